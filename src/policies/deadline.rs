//! 截止时间窗口与截止时间解析

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::errors::{Result, TrackerError};

/// 以天为单位、相对当前时间的闭区间 `[now + lower, now + upper]`
///
/// `upper_days` 为 None 表示没有上界。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindow {
    pub lower_days: i64,
    pub upper_days: Option<i64>,
}

impl DeadlineWindow {
    /// 未来 7 天内截止（包含此刻截止）
    pub const UPCOMING: DeadlineWindow = DeadlineWindow {
        lower_days: 0,
        upper_days: Some(7),
    };

    /// 尚未截止
    pub const NOT_YET_DUE: DeadlineWindow = DeadlineWindow {
        lower_days: 0,
        upper_days: None,
    };

    pub fn contains(&self, deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        in_window(deadline, now, self.lower_days, self.upper_days)
    }
}

/// `now + lower ≤ deadline ≤ now + upper`
///
/// 偏移量超出时间范围时按无穷处理：下界溢出不匹配，上界溢出视为无上界。
pub fn in_window(
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
    lower_days: i64,
    upper_days: Option<i64>,
) -> bool {
    let lower = TimeDelta::try_days(lower_days).and_then(|d| now.checked_add_signed(d));
    let lower_ok = match lower {
        Some(bound) => bound <= deadline,
        None => lower_days < 0,
    };
    if !lower_ok {
        return false;
    }

    match upper_days {
        None => true,
        Some(days) => {
            match TimeDelta::try_days(days).and_then(|d| now.checked_add_signed(d)) {
                Some(bound) => deadline <= bound,
                None => days > 0,
            }
        }
    }
}

/// 将客户端提交的截止时间解析为 UTC 时间点
///
/// 支持 RFC 3339、不带时区的日期时间（按 UTC）以及纯日期（当天 00:00 UTC）。
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(TrackerError::invalid_deadline(format!(
        "无法解析截止时间: {raw}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::fixtures::now;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_upcoming_window_edges() {
        let w = DeadlineWindow::UPCOMING;
        assert!(w.contains(now(), now()));
        assert!(w.contains(now() + Duration::days(7), now()));
        assert!(!w.contains(now() + Duration::days(7) + Duration::milliseconds(1), now()));
        assert!(!w.contains(now() - Duration::milliseconds(1), now()));
    }

    #[test]
    fn test_not_yet_due_has_no_upper_bound() {
        let w = DeadlineWindow::NOT_YET_DUE;
        assert!(w.contains(now(), now()));
        assert!(w.contains(now() + Duration::days(3650), now()));
        assert!(!w.contains(now() - Duration::seconds(1), now()));
    }

    #[test]
    fn test_overflowing_offsets() {
        assert!(in_window(now(), now(), i64::MIN, Some(i64::MAX)));
        assert!(!in_window(now(), now(), i64::MAX, None));
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_deadline("2025-03-12T18:00:00+08:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap());
        let dt = parse_deadline("2025-03-12T10:00:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_forms() {
        assert_eq!(
            parse_deadline("2025-03-12T10:15").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 12, 10, 15, 0).unwrap()
        );
        assert_eq!(
            parse_deadline(" 2025-03-12 ").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 12, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_failure_is_invalid_deadline() {
        for raw in ["", "tomorrow", "2025-13-40", "12/03/2025"] {
            let err = parse_deadline(raw).unwrap_err();
            assert_eq!(err.code(), "E104", "{raw}");
        }
    }
}
