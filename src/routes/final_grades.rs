use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::final_grades::requests::PublishFinalGradesRequest;
use crate::models::users::entities::UserRole;
use crate::services::FinalGradeService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 FINAL_GRADE_SERVICE 实例
static FINAL_GRADE_SERVICE: Lazy<FinalGradeService> = Lazy::new(FinalGradeService::new_lazy);

pub async fn finalize_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    FINAL_GRADE_SERVICE.finalize_course(&req, course_id.0).await
}

pub async fn list_final_grades(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    FINAL_GRADE_SERVICE.list_final_grades(&req, course_id.0).await
}

pub async fn get_my_final_grade(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    FINAL_GRADE_SERVICE
        .get_my_final_grade(&req, course_id.0)
        .await
}

pub async fn publish_final_grades(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    publish_data: web::Json<PublishFinalGradesRequest>,
) -> ActixResult<HttpResponse> {
    FINAL_GRADE_SERVICE
        .publish_final_grades(&req, course_id.0, publish_data.into_inner())
        .await
}

// 配置路由（需在 configure_courses_routes 之前注册）
pub fn configure_final_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/final-grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_final_grades)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/finalize").route(
                    web::post()
                        .to(finalize_course)
                        // 授课教师或管理员触发结算
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/publish").route(
                    web::put()
                        .to(publish_final_grades)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/me").route(
                    web::get()
                        .to(get_my_final_grade)
                        // 学生只能看到已发布的成绩
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
