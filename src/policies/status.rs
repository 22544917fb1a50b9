//! 截止状态分类
//!
//! 按 `deadline - now` 划分：
//! - `< 0`：Overdue
//! - `[0, 1 天)`：DueToday
//! - `[1 天, 2 天]`：DueSoon
//! - `> 2 天`：Upcoming

use chrono::{DateTime, Utc};

use crate::models::assignments::entities::DeadlineStatus;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn classify(deadline: DateTime<Utc>, now: DateTime<Utc>) -> DeadlineStatus {
    let diff = deadline.signed_duration_since(now).num_milliseconds();

    if diff < 0 {
        DeadlineStatus::Overdue
    } else if diff < MILLIS_PER_DAY {
        DeadlineStatus::DueToday
    } else if diff <= 2 * MILLIS_PER_DAY {
        DeadlineStatus::DueSoon
    } else {
        DeadlineStatus::Upcoming
    }
}

/// 剩余天数，向上取整（已截止时为 0 或负数）
pub fn days_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = deadline.signed_duration_since(now).num_milliseconds();
    if diff > 0 {
        (diff + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    } else {
        // 整数除法向零截断，对负数即向上取整
        diff / MILLIS_PER_DAY
    }
}
