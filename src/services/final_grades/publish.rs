use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FinalGradeService;
use crate::models::ApiResponse;
use crate::models::final_grades::requests::PublishFinalGradesRequest;
use crate::models::final_grades::responses::PublishFinalGradesResponse;
use crate::services::course_access::{internal_error, load_managed_course};

pub async fn publish_final_grades(
    service: &FinalGradeService,
    request: &HttpRequest,
    course_id: i64,
    publish_data: PublishFinalGradesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match load_managed_course(&storage, request, course_id).await {
        Ok((user, _)) => user,
        Err(resp) => return Ok(resp),
    };

    let published = publish_data.published;
    match storage
        .set_final_grades_published(course_id, published)
        .await
    {
        Ok(updated) => {
            service.invalidate_list_cache(request, course_id).await;
            info!(
                "Final grades of course {} set published={} by {} ({} record(s))",
                course_id, published, user.id, updated
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PublishFinalGradesResponse {
                    course_id,
                    published,
                    updated,
                },
                if published {
                    "Final grades published successfully"
                } else {
                    "Final grades withdrawn successfully"
                },
            )))
        }
        Err(e) => Ok(internal_error("Failed to update publish state", e)),
    }
}
