use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeEntryService;
use crate::models::grade_entries::requests::{GradeEntryQuery, RecordAssignmentGradeRequest};
use crate::models::grade_entries::responses::AssignmentGradeListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{internal_error, load_managed_course, require_enrolled};
use crate::utils::validate::validate_assignment_grade;

pub async fn record_assignment_grade(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    grade: RecordAssignmentGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match load_managed_course(&storage, request, course_id).await {
        Ok((user, _)) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_assignment_grade(&grade) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeEntryInvalid, msg)));
    }

    if let Err(resp) = require_enrolled(&storage, course_id, grade.student_id).await {
        return Ok(resp);
    }

    match storage
        .upsert_assignment_grade(course_id, grade, user.id)
        .await
    {
        Ok(saved) => {
            info!(
                "Assignment {} grade for student {} recorded by {}",
                saved.assignment_id, saved.student_id, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                saved,
                "Assignment grade recorded successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to record assignment grade", e)),
    }
}

pub async fn list_assignment_grades(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    query: GradeEntryQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    match storage
        .list_assignment_grades(course_id, query.student_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentGradeListResponse { course_id, items },
            "Assignment grades retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve assignment grades", e)),
    }
}
