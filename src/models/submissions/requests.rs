use serde::Deserialize;
use ts_rs::TS;

/// 提交作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: String,
}
