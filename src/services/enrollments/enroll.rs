use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::models::enrollments::requests::EnrollStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{internal_error, is_unique_violation, load_managed_course};

pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
    enroll_data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    let student_id = enroll_data.student_id;
    if student_id <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "student_id must be a positive integer",
        )));
    }

    match storage.get_enrollment(course_id, student_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentAlreadyExists,
                "Student is already enrolled in this course",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to get enrollment", e)),
    }

    match storage.enroll_student(course_id, student_id).await {
        Ok(enrollment) => {
            info!("Student {} enrolled in course {}", student_id, course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Student enrolled successfully",
            )))
        }
        Err(e) => {
            let msg = e.to_string();
            if is_unique_violation(&msg) {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::EnrollmentAlreadyExists,
                    "Student is already enrolled in this course",
                )))
            } else {
                error!("Enrollment failed: {}", msg);
                Ok(internal_error("Enrollment failed", msg))
            }
        }
    }
}
