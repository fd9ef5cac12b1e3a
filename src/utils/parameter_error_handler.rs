//! 参数解析失败与未知路由的统一错误响应

use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("Invalid JSON body: {e}"),
        _ => format!("Invalid request body: {err}"),
    };
    debug!("JSON 解析失败 {}: {}", req.path(), message);

    let response = HttpResponse::BadRequest()
        .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");
    debug!("查询参数解析失败 {}: {}", req.path(), message);

    let response = HttpResponse::BadRequest()
        .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

/// 未匹配任何路由时的 404
pub async fn not_found_handler(req: HttpRequest) -> ActixResult<HttpResponse> {
    debug!("未知路由: {} {}", req.method(), req.path());
    Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
        ErrorCode::NotFound,
        &format!("No route for {} {}", req.method(), req.path()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};

    #[actix_web::test]
    async fn test_unknown_route_returns_json_404() {
        let app = test::init_service(
            App::new().default_service(web::route().to(not_found_handler)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1004);
    }
}
