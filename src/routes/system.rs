use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::SystemService;
use crate::services::system::settings;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn get_settings(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_settings(&request).await
}

pub async fn get_grade_ranges(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_grade_ranges(&request).await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middleware::Compress::default())
            .wrap(middlewares::RequireJWT)
            .route("/settings", web::get().to(get_settings))
            .route("/grade-ranges", web::get().to(get_grade_ranges))
            .service(
                web::scope("/admin")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/settings", web::get().to(settings::get_admin_settings))
                    .route("/settings/audits", web::get().to(settings::get_setting_audits))
                    .route("/settings/{key}", web::put().to(settings::update_setting))
                    .route(
                        "/grade-ranges",
                        web::put().to(settings::update_grade_ranges),
                    ),
            ),
    );
}
