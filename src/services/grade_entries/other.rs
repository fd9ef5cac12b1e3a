//! 其他成绩（加减分）
//!
//! 分值可为负，必须填写原因。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::GradeEntryService;
use crate::models::grade_entries::entities::OtherGrade;
use crate::models::grade_entries::requests::{
    CreateOtherGradeRequest, GradeEntryQuery, UpdateOtherGradeRequest,
};
use crate::models::grade_entries::responses::OtherGradeListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{internal_error, load_managed_course, require_enrolled};
use crate::storage::Storage;
use crate::utils::validate::{validate_other_points, validate_reason};

pub async fn create_other_grade(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    grade: CreateOtherGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match load_managed_course(&storage, request, course_id).await {
        Ok((user, _)) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) =
        validate_reason(&grade.reason).and_then(|_| validate_other_points(grade.points))
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeEntryInvalid, msg)));
    }

    if let Err(resp) = require_enrolled(&storage, course_id, grade.student_id).await {
        return Ok(resp);
    }

    match storage.create_other_grade(course_id, grade, user.id).await {
        Ok(saved) => {
            info!(
                "Other grade {} ({:+}) for student {} created by {}",
                saved.id, saved.points, saved.student_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                saved,
                "Other grade created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create other grade", e)),
    }
}

pub async fn update_other_grade(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    other_grade_id: i64,
    update: UpdateOtherGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    if let Some(reason) = &update.reason
        && let Err(msg) = validate_reason(reason)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeEntryInvalid, msg)));
    }

    if let Some(points) = update.points
        && let Err(msg) = validate_other_points(points)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeEntryInvalid, msg)));
    }

    if let Err(resp) = fetch_course_other_grade(&storage, course_id, other_grade_id).await {
        return Ok(resp);
    }

    match storage.update_other_grade(other_grade_id, update).await {
        Ok(Some(saved)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            saved,
            "Other grade updated successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update other grade", e)),
    }
}

pub async fn delete_other_grade(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    other_grade_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    if let Err(resp) = fetch_course_other_grade(&storage, course_id, other_grade_id).await {
        return Ok(resp);
    }

    match storage.delete_other_grade(other_grade_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Other grade deleted successfully"))),
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete other grade", e)),
    }
}

pub async fn list_other_grades(
    service: &GradeEntryService,
    request: &HttpRequest,
    course_id: i64,
    query: GradeEntryQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    match storage.list_other_grades(course_id, query.student_id).await {
        Ok(items) => {
            let total_points = items
                .iter()
                .fold(0i64, |acc, g| acc.saturating_add(g.points));
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                OtherGradeListResponse {
                    course_id,
                    total_points,
                    items,
                },
                "Other grades retrieved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to retrieve other grades", e)),
    }
}

/// 成绩条目必须属于路径中的课程
async fn fetch_course_other_grade(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    other_grade_id: i64,
) -> Result<OtherGrade, HttpResponse> {
    match storage.get_other_grade_by_id(other_grade_id).await {
        Ok(Some(grade)) if grade.course_id == course_id => Ok(grade),
        Ok(_) => Err(not_found()),
        Err(e) => Err(internal_error("Failed to get other grade", e)),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradeEntryNotFound,
        "Other grade not found",
    ))
}
