//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。
//! 鉴权类错误（未认证、无权限、不存在）对调用方只暴露错误种类，
//! 不泄露校验细节。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tracker_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum TrackerError {
            $($variant(String),)*
        }

        impl TrackerError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TrackerError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TrackerError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(TrackerError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TrackerError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TrackerError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TrackerError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tracker_errors! {
    Unauthenticated("E101", "Unauthenticated", UNAUTHORIZED),
    Forbidden("E102", "Forbidden", FORBIDDEN),
    NotFound("E103", "Resource Not Found", NOT_FOUND),
    InvalidDeadline("E104", "Invalid Deadline", BAD_REQUEST),
    ValidationFailed("E105", "Validation Failed", BAD_REQUEST),
    Configuration("E201", "Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E202", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E203", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E204", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E205", "Serialization Error", INTERNAL_SERVER_ERROR),
}

impl TrackerError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            TrackerError::Unauthenticated(_) => ErrorCode::Unauthorized,
            TrackerError::Forbidden(_) => ErrorCode::Forbidden,
            TrackerError::NotFound(_) => ErrorCode::NotFound,
            TrackerError::InvalidDeadline(_) => ErrorCode::InvalidDeadline,
            TrackerError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrackerError {}

impl ResponseError for TrackerError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        // 内部错误只记录日志，不把细节返回给客户端
        let message = if self.is_internal() {
            error!("{} {}", self.code(), self.format_simple());
            "服务器内部错误".to_string()
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status())
            .json(ApiResponse::<()>::error_empty(self.error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TrackerError {
    fn from(err: sea_orm::DbErr) -> Self {
        TrackerError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TrackerError {
    fn from(err: config::ConfigError) -> Self {
        TrackerError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TrackerError::unauthenticated("test").code(), "E101");
        assert_eq!(TrackerError::forbidden("test").code(), "E102");
        assert_eq!(TrackerError::not_found("test").code(), "E103");
        assert_eq!(TrackerError::invalid_deadline("test").code(), "E104");
        assert_eq!(TrackerError::validation_failed("test").code(), "E105");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TrackerError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            TrackerError::validation_failed("test").error_type(),
            "Validation Failed"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TrackerError::unauthenticated("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(TrackerError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(TrackerError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            TrackerError::invalid_deadline("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert!(TrackerError::configuration("x").is_internal());
        assert!(!TrackerError::forbidden("x").is_internal());
    }

    #[test]
    fn test_format_simple() {
        let err = TrackerError::invalid_deadline("bad date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Deadline"));
        assert!(formatted.contains("bad date"));
    }

    #[test]
    fn test_internal_error_response_status() {
        let err = TrackerError::database_operation("connection reset by peer");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
