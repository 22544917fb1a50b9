/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，成功后把 `Principal` 放入请求扩展，
 * 失败时返回 401。缺失、签名错误、过期对客户端返回同一条信息。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new()
 *     .app_data(web::Data::new(token_authorizer))
 *     .service(
 *         web::scope("/api/assignments")
 *             .wrap(RequireJWT)
 *             .route("", web::get().to(list_handler)),
 *     )
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_principal(&req)` 取得主体。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error};

use super::create_error_response;
use crate::errors::{Result, TrackerError};
use crate::models::ErrorCode;
use crate::models::auth::entities::Principal;
use crate::utils::TokenAuthorizer;

#[derive(Clone)]
pub struct RequireJWT;

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            let Some(authorizer) = req.app_data::<web::Data<TokenAuthorizer>>().cloned() else {
                error!("TokenAuthorizer not found in app data");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "服务器内部错误",
                    )
                    .map_into_right_body(),
                ));
            };

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok());

            match authorizer.authorize_header(header) {
                Ok(principal) => {
                    debug!(
                        "JWT authentication successful for {} ({})",
                        principal.subject, principal.role
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    debug!("JWT authentication failed for request to {}", req.path());
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            err.error_code(),
                            err.message(),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取主体
impl RequireJWT {
    /// 从请求扩展中提取主体，必须在应用了 RequireJWT 的路由中使用
    pub fn extract_principal(req: &HttpRequest) -> Result<Principal> {
        req.extensions()
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| TrackerError::unauthenticated("Authentication required"))
    }
}
