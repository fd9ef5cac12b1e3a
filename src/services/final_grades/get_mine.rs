use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FinalGradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{current_user, internal_error};

pub async fn get_my_final_grade(
    service: &FinalGradeService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_final_grade(course_id, user.id).await {
        Ok(Some(record)) if record.is_published => Ok(HttpResponse::Ok().json(
            ApiResponse::success(record, "Final grade retrieved successfully"),
        )),
        // 未发布的成绩对学生不可见
        Ok(Some(_)) => Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::FinalGradeNotPublished,
            "Final grade has not been published yet",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FinalGradeNotFound,
            "Final grade not found",
        ))),
        Err(e) => Ok(internal_error("Failed to get final grade", e)),
    }
}
