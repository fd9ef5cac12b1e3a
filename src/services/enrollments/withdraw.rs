use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{internal_error, load_managed_course};

pub async fn drop_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    match storage.drop_student(course_id, student_id).await {
        Ok(true) => {
            info!("Student {} dropped from course {}", student_id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student dropped successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(internal_error("Failed to drop student", e)),
    }
}
