pub mod error_code;
pub mod ids;
pub mod response;
