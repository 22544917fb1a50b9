use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{AssignmentId, SubmissionId, UserId};

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "submission.ts")]
pub enum SubmissionStatus {
    Submitted, // 已提交，待批改
    Graded,    // 已批改
}

impl SubmissionStatus {
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => SubmissionStatus::SUBMITTED,
            SubmissionStatus::Graded => SubmissionStatus::GRADED,
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(format!(
                "无效的提交状态: '{s}'. 支持的状态: submitted, graded"
            )),
        }
    }
}

/// 作业提交
///
/// `assignment_id` 可能指向已删除的作业，关联时按“无匹配”处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: SubmissionId,
    pub assignment_id: AssignmentId,
    pub student_id: UserId,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub grade: Option<f64>,
}

/// 新建提交（存储层输入）
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: AssignmentId,
    pub student_id: UserId,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub grade: Option<f64>,
}
