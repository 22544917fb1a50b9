use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::policies::VisibilityPolicy;

/// 健康检查响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
    // 学生可见范围
    #[ts(type = "\"open\" | \"assigned\"")]
    pub student_visibility: VisibilityPolicy,
}
