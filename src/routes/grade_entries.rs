use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grade_entries::requests::{
    CreateOtherGradeRequest, GradeEntryQuery, RecordAssignmentGradeRequest,
    RecordExamGradeRequest, UpdateOtherGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeEntryService;
use crate::utils::{SafeCourseIdI64, SafeOtherGradeIdI64};

// 懒加载的全局 GRADE_ENTRY_SERVICE 实例
static GRADE_ENTRY_SERVICE: Lazy<GradeEntryService> = Lazy::new(GradeEntryService::new_lazy);

pub async fn list_assignment_grades(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<GradeEntryQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .list_assignment_grades(&req, course_id.0, query.into_inner())
        .await
}

pub async fn record_assignment_grade(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    grade: web::Json<RecordAssignmentGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .record_assignment_grade(&req, course_id.0, grade.into_inner())
        .await
}

pub async fn list_exam_grades(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<GradeEntryQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .list_exam_grades(&req, course_id.0, query.into_inner())
        .await
}

pub async fn record_exam_grade(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    grade: web::Json<RecordExamGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .record_exam_grade(&req, course_id.0, grade.into_inner())
        .await
}

pub async fn list_other_grades(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<GradeEntryQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .list_other_grades(&req, course_id.0, query.into_inner())
        .await
}

pub async fn create_other_grade(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    grade: web::Json<CreateOtherGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .create_other_grade(&req, course_id.0, grade.into_inner())
        .await
}

pub async fn update_other_grade(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    other_grade_id: SafeOtherGradeIdI64,
    update: web::Json<UpdateOtherGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .update_other_grade(&req, course_id.0, other_grade_id.0, update.into_inner())
        .await
}

pub async fn delete_other_grade(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    other_grade_id: SafeOtherGradeIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_ENTRY_SERVICE
        .delete_other_grade(&req, course_id.0, other_grade_id.0)
        .await
}

// 配置路由（需在 configure_courses_routes 之前注册）
pub fn configure_grade_entries_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/grades")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                // 按 课程+学生+作业 覆盖写入
                web::resource("/assignments")
                    .route(web::get().to(list_assignment_grades))
                    .route(web::put().to(record_assignment_grade)),
            )
            .service(
                web::resource("/exams")
                    .route(web::get().to(list_exam_grades))
                    .route(web::put().to(record_exam_grade)),
            )
            .service(
                web::resource("/other")
                    .route(web::get().to(list_other_grades))
                    .route(web::post().to(create_other_grade)),
            )
            .service(
                web::resource("/other/{other_grade_id}")
                    .route(web::put().to(update_other_grade))
                    .route(web::delete().to(delete_other_grade)),
            ),
    );
}
