//! 数据模型定义
//!
//! - `entities`: 业务实体
//! - `requests`: 请求参数
//! - `responses`: 响应结构

pub mod assignments;
pub mod auth;
pub mod common;
pub mod submissions;
pub mod system;

pub use common::error_code::ErrorCode;
pub use common::ids::{AssignmentId, IdParseError, SubmissionId, UserId};
pub use common::response::ApiResponse;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
