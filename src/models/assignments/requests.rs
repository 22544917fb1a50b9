use serde::Deserialize;
use ts_rs::TS;

use crate::models::assignments::entities::StatusCategory;

/// 创建作业请求
///
/// 必填项（title、deadline、subject）在业务层校验，缺失时返回 ValidationFailed。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>, // ISO 8601，如 "2026-01-24T12:00:00Z" 或 "2026-01-24"
    pub subject: Option<String>,
    pub max_score: Option<f64>,
    pub attachments: Option<Vec<String>>, // 附件 URL 列表
    pub assigned_to: Option<Vec<String>>, // 学生 ID 列表
}

/// 更新作业请求
///
/// 缺省字段保持原值；拒绝未知字段，`created_by` 无法通过更新修改。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub subject: Option<String>,
    pub max_score: Option<f64>,
    pub attachments: Option<Vec<String>>,
    pub assigned_to: Option<Vec<String>>,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    /// 搜索关键词（标题、描述、科目）
    pub search: Option<String>,
    /// 科目
    pub subject: Option<String>,
    /// 状态类别
    pub status: Option<StatusCategory>,
}
