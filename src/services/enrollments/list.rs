use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::ApiResponse;
use crate::models::enrollments::requests::EnrollmentQueryParams;
use crate::services::course_access::{internal_error, load_managed_course};

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
    query: EnrollmentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    let (page, size) = query.pagination.normalized();
    match storage
        .list_enrollments_with_pagination(course_id, page, size)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve enrollment list", e)),
    }
}
