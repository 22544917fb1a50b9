use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::policies::{AccessControl, Operation};
use crate::services::AssignmentService;
use crate::utils::SafeAssignmentId;

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let response = service
        .list_assignments(&principal, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取作业列表成功")))
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let assignment = service
        .create_assignment(&principal, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: SafeAssignmentId,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let assignment = service
        .update_assignment(&principal, &path.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    service.delete_assignment(&principal, &path.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已删除")))
}

// 七天内到期的作业
pub async fn list_upcoming(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let items = service.list_upcoming(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取即将到期作业成功")))
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

// 学生作业进度
pub async fn student_progress(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(&req)?;
    let progress = service.student_progress(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(progress, "获取作业进度成功")))
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig, access: &AccessControl) {
    let require = |op: Operation| middlewares::RequireRole::new(access.gate(op));

    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出作业 - 教师与学生均可访问（业务层按角色限定范围）
                    .route(web::get().to(list_assignments))
                    // 创建作业 - 仅教师
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(require(Operation::CreateAssignment)),
                    ),
            )
            // 以下仅学生
            .service(
                web::resource("/upcoming")
                    .route(web::get().to(list_upcoming))
                    .wrap(require(Operation::ListUpcoming)),
            )
            .service(
                web::resource("/recent")
                    .route(web::get().to(list_recent))
                    .wrap(require(Operation::ListRecent)),
            )
            .service(
                web::resource("/progress")
                    .route(web::get().to(student_progress))
                    .wrap(require(Operation::StudentProgress)),
            )
            .service(
                web::resource("/{id}")
                    // 更新作业 - 仅教师，归属在业务层校验
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(require(Operation::UpdateAssignment)),
                    )
                    // 删除作业 - 仅教师，归属在业务层校验
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(require(Operation::DeleteAssignment)),
                    ),
            ),
    );
}
