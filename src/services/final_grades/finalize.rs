use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::FinalGradeService;
use crate::errors::{LmsError, Result};
use crate::grading;
use crate::models::final_grades::responses::FinalizeReport;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::load_managed_course;
use crate::services::system::DynamicConfig;

pub async fn finalize_course(
    service: &FinalGradeService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match load_managed_course(&storage, request, course_id).await {
        Ok((user, _)) => user,
        Err(resp) => return Ok(resp),
    };

    info!("Course {} finalization requested by {}", course_id, user.id);

    let table = DynamicConfig::grade_ranges().await;
    let result = grading::finalize_course(storage.as_ref(), course_id, table.as_deref()).await;

    // 部分写入也会改变已存储的成绩
    if !matches!(result, Err(LmsError::Configuration(_))) {
        service.invalidate_list_cache(request, course_id).await;
    }

    Ok(finalize_response(result))
}

/// 全部成功 200；部分学生失败 500 并附带报告；等级分数段不可用 422
pub(crate) fn finalize_response(result: Result<FinalizeReport>) -> HttpResponse {
    match result {
        Ok(report) if report.is_complete() => HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Final grades calculated successfully",
        )),
        Ok(report) => {
            warn!(
                run_id = %report.run_id,
                "Finalization of course {} finished with {} failed student(s)",
                report.course_id,
                report.failures.len()
            );
            let message = format!(
                "Failed to finalize grades for {} student(s)",
                report.failures.len()
            );
            HttpResponse::InternalServerError().json(ApiResponse::error(
                ErrorCode::FinalizationPartialFailure,
                report,
                message,
            ))
        }
        Err(LmsError::Configuration(msg)) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::GradeRangeMissing, msg),
        ),
        Err(e) => {
            error!("Finalization failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Finalization failed: {e}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::runner::LETTER_ASSIGNMENT_FAILED;
    use crate::models::final_grades::responses::StudentFailure;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    fn report(failures: Vec<StudentFailure>) -> FinalizeReport {
        FinalizeReport {
            run_id: uuid::Uuid::new_v4(),
            course_id: 3,
            finalized: 2,
            failures,
            records: Vec::new(),
        }
    }

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_complete_run_is_ok() {
        let resp = finalize_response(Ok(report(vec![])));
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["finalized"], 2);
    }

    #[actix_web::test]
    async fn test_partial_failure_returns_report() {
        let resp = finalize_response(Ok(report(vec![StudentFailure {
            student_id: 8,
            message: "写入最终成绩失败".to_string(),
        }])));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["code"], ErrorCode::FinalizationPartialFailure as i32);
        assert_eq!(json["data"]["failures"][0]["student_id"], 8);
    }

    #[actix_web::test]
    async fn test_missing_table_is_unprocessable() {
        let err = LmsError::configuration(format!(
            "{LETTER_ASSIGNMENT_FAILED}: grade range table is not configured"
        ));
        let resp = finalize_response(Err(err));
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with(LETTER_ASSIGNMENT_FAILED)
        );
        assert!(json.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_read_failure_is_internal_error() {
        let resp = finalize_response(Err(LmsError::database_operation("读取选课名单失败")));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["code"], ErrorCode::InternalServerError as i32);
    }
}
