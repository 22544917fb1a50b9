//! 安全的路径参数提取器
//!
//! 在进入处理函数之前把路径中的 ID 规范化。格式错误的 ID 不可能对应任何作业，按不存在处理。

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::errors::TrackerError;
use crate::models::AssignmentId;

/// 路径参数 `{id}` 中的作业 ID
#[derive(Debug, Clone)]
pub struct SafeAssignmentId(pub AssignmentId);

impl FromRequest for SafeAssignmentId {
    type Error = TrackerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            Some(raw) => AssignmentId::parse(raw)
                .map(SafeAssignmentId)
                .map_err(|_| TrackerError::not_found(format!("作业不存在: {raw}"))),
            None => Err(TrackerError::validation_failed("缺少作业 ID")),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_and_normalizes() {
        let id = AssignmentId::generate();
        let req = TestRequest::default()
            .param("id", id.as_str().to_uppercase())
            .to_http_request();

        let extracted = SafeAssignmentId::extract(&req).await.unwrap();
        assert_eq!(extracted.0, id);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_not_found() {
        let req = TestRequest::default()
            .param("id", "not-an-id")
            .to_http_request();

        let err = SafeAssignmentId::extract(&req).await.unwrap_err();
        assert_eq!(err, TrackerError::not_found("作业不存在: not-an-id"));
    }
}
