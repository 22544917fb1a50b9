// 业务错误码，随响应体中的 code 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    InvalidDeadline = 1002,

    // 认证授权错误
    Unauthorized = 2000,
    Forbidden = 2001,

    // 资源错误
    NotFound = 3000,

    // 服务端错误
    InternalServerError = 5000,
}
