use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeEntryService;
use crate::models::grade_entries::requests::{GradeEntryQuery, RecordExamGradeRequest};
use crate::models::grade_entries::responses::ExamGradeListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{internal_error, load_managed_course, require_enrolled};
use crate::utils::validate::validate_exam_grade;

pub async fn record_exam_grade(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    grade: RecordExamGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match load_managed_course(&storage, request, course_id).await {
        Ok((user, _)) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_exam_grade(&grade) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeEntryInvalid, msg)));
    }

    if let Err(resp) = require_enrolled(&storage, course_id, grade.student_id).await {
        return Ok(resp);
    }

    match storage.upsert_exam_grade(course_id, grade, user.id).await {
        Ok(saved) => {
            info!(
                "Exam {} grade for student {} recorded by {} (graded: {})",
                saved.exam_id, saved.student_id, user.id, saved.is_graded
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                saved,
                "Exam grade recorded successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to record exam grade", e)),
    }
}

pub async fn list_exam_grades(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    query: GradeEntryQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    match storage.list_exam_grades(course_id, query.student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamGradeListResponse { course_id, items },
            "Exam grades retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve exam grades", e)),
    }
}
