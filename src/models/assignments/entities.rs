use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{AssignmentId, UserId};

/// 作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: AssignmentId,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 截止时间
    pub deadline: DateTime<Utc>,
    // 科目
    pub subject: String,
    // 满分
    pub max_score: f64,
    // 附件链接（有序）
    pub attachments: Vec<String>,
    // 创建者，创建后不可修改
    pub created_by: UserId,
    // 指定的学生（为空表示不限制）
    pub assigned_to: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }

    /// 未指定学生时对所有人开放
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assigned_to.is_empty() || self.assigned_to.contains(user)
    }
}

/// 新建作业（存储层输入，字段已校验）
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub subject: String,
    pub max_score: f64,
    pub attachments: Vec<String>,
    pub created_by: UserId,
    pub assigned_to: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// 作业字段更新（存储层输入），None 表示保持原值
///
/// 不包含 `created_by`：归属关系在创建后不可变。
#[derive(Debug, Clone, Default)]
pub struct AssignmentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub max_score: Option<f64>,
    pub attachments: Option<Vec<String>>,
    pub assigned_to: Option<Vec<UserId>>,
    pub updated_at: DateTime<Utc>,
}

/// 截止状态（按截止时间与当前时间计算，不落库）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum DeadlineStatus {
    Overdue,
    DueToday,
    DueSoon,
    Upcoming,
}

/// 学生视角的完成状态（按提交记录关联计算，不落库）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum ProgressStatus {
    Completed,
    Overdue,
    Pending,
}

/// 列表筛选用的状态类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum StatusCategory {
    /// 尚未截止
    Active,
    /// 已截止
    Expired,
    /// 未来 7 天内截止
    Upcoming,
    DueToday,
    DueSoon,
    Completed,
    Pending,
    Overdue,
}

impl StatusCategory {
    /// 是否依赖学生的提交记录
    pub fn requires_progress(&self) -> bool {
        matches!(
            self,
            StatusCategory::Completed | StatusCategory::Pending | StatusCategory::Overdue
        )
    }
}
