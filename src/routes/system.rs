use actix_web::{HttpResponse, Result as ActixResult, middleware, web};

use crate::config::AppConfig;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, AppStartTime};

// 健康检查
pub async fn health(
    start_time: web::Data<AppStartTime>,
    config: web::Data<AppConfig>,
) -> ActixResult<HttpResponse> {
    let now = chrono::Utc::now();
    let response = HealthResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at: start_time.start_datetime,
        uptime_seconds: now
            .signed_duration_since(start_time.start_datetime)
            .num_seconds(),
        student_visibility: config.tracker.student_visibility,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "ok")))
}

// 配置路由（无需认证）
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/health")
            .wrap(middleware::Compress::default())
            .route(web::get().to(health)),
    );
}
