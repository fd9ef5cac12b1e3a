use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{FinalGradeService, final_grades_cache_key};
use crate::cache::{get_json, insert_json};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::final_grades::responses::FinalGradeListResponse;
use crate::services::course_access::{internal_error, load_managed_course};

pub async fn list_final_grades(
    service: &FinalGradeService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_managed_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    let cache = service.get_cache(request);
    let key = final_grades_cache_key(course_id);

    if let Some(cache) = &cache
        && let Some(cached) = get_json::<FinalGradeListResponse>(cache.as_ref(), &key).await
    {
        debug!("Final grade list cache hit: {}", key);
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            cached,
            "Final grades retrieved successfully",
        )));
    }

    let items = match storage.list_final_grade_records(course_id).await {
        Ok(items) => items,
        Err(e) => return Ok(internal_error("Failed to retrieve final grades", e)),
    };
    let response = FinalGradeListResponse { course_id, items };

    if let Some(cache) = &cache {
        let ttl = AppConfig::get().grading.list_cache_ttl;
        insert_json(cache.as_ref(), &key, &response, ttl).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Final grades retrieved successfully",
    )))
}
