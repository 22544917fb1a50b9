use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::policies::{AccessControl, Operation};
use crate::services::{AssignmentService, SubmissionService};

// 提交作业
pub async fn create_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let submission = service.submit(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(submission, "作业提交成功")))
}

// 我的提交记录
pub async fn list_my_submissions(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let items = service.list_mine(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取提交记录成功")))
}

// 尚未截止的作业
pub async fn list_open_deadlines(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let items = service.list_open_deadlines(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取未截止作业成功")))
}

// 最近发布的作业
pub async fn list_recent(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let items = service.list_recent(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取最近作业成功")))
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig, access: &AccessControl) {
    let require = |op: Operation| middlewares::RequireRole::new(access.gate(op));

    // 全部仅学生
    cfg.service(
        web::scope("/api/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::post().to(create_submission))
                    .wrap(require(Operation::SubmitAssignment)),
            )
            .service(
                web::resource("/mine")
                    .route(web::get().to(list_my_submissions))
                    .wrap(require(Operation::ListMySubmissions)),
            )
            .service(
                web::resource("/upcoming")
                    .route(web::get().to(list_open_deadlines))
                    .wrap(require(Operation::ListOpenDeadlines)),
            )
            .service(
                web::resource("/recent")
                    .route(web::get().to(list_recent))
                    .wrap(require(Operation::ListRecent)),
            ),
    );
}
