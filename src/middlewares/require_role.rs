/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。门禁来自启动时构建的 `AccessControl`，
 * 与服务层使用同一张角色表；路由层提前拒绝，服务层仍会再次校验。
 *
 * ```rust,ignore
 * web::resource("")
 *     .wrap(RequireRole::new(access.gate(Operation::CreateAssignment)))
 *     .route(web::post().to(create_handler))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::auth::entities::Principal;
use crate::policies::RoleGate;

#[derive(Clone)]
pub struct RequireRole {
    gate: RoleGate,
}

impl RequireRole {
    pub fn new(gate: &RoleGate) -> Self {
        Self { gate: gate.clone() }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            gate: Rc::new(self.gate.clone()),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    gate: Rc<RoleGate>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            // 从请求扩展中获取主体
            let principal = req.extensions().get::<Principal>().cloned();

            match principal {
                Some(principal) => match gate.check(&principal) {
                    Ok(()) => {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    }
                    Err(err) => Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            err.error_code(),
                            err.message(),
                        )
                        .map_into_right_body(),
                    )),
                },
                None => {
                    info!(
                        "Role check failed: No principal found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
