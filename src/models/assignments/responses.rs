use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::AssignmentId;
use crate::models::assignments::entities::{Assignment, DeadlineStatus, ProgressStatus};

/// 带派生状态的作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub deadline_status: DeadlineStatus,
    /// 剩余天数（向上取整，已截止为负数或 0）
    pub days_left: i64,
    /// 学生视角下的完成状态
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressStatus>,
}

/// 作业列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<AssignmentView>,
    /// 可见作业中出现过的科目（去重排序，用于筛选）
    pub subjects: Vec<String>,
}

/// 学生作业统计
///
/// `pending` 始终由 `total - completed - overdue` 推出，不单独统计。
/// 只能经 `ProgressStats::new` 构造，因此不实现反序列化。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct ProgressStats {
    total: i64,
    completed: i64,
    pending: i64,
    overdue: i64,
}

impl ProgressStats {
    pub fn new(total: i64, completed: i64, overdue: i64) -> Self {
        Self {
            total,
            completed,
            pending: total - completed - overdue,
            overdue,
        }
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn completed(&self) -> i64 {
        self.completed
    }

    pub fn pending(&self) -> i64 {
        self.pending
    }

    pub fn overdue(&self) -> i64 {
        self.overdue
    }
}

/// 单个作业的完成情况
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentProgress {
    pub assignment_id: AssignmentId,
    pub title: String,
    pub subject: String,
    pub deadline: DateTime<Utc>,
    pub status: ProgressStatus,
}

/// 学生作业进度响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct StudentProgressResponse {
    pub stats: ProgressStats,
    pub items: Vec<AssignmentProgress>,
}
