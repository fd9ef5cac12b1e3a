use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::{info, warn};

use super::{DynamicConfig, SystemService};
use crate::grading::{GradeRangeTable, RangeViolation};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::KnownSettingKey,
        requests::{SettingAuditQuery, UpdateGradeRangesRequest, UpdateSettingRequest},
        responses::{
            AdminSettingsListResponse, GradeRangeViolationsResponse, GradeRangesResponse,
            SettingResponse, SystemSettingsResponse,
        },
    },
};
use crate::storage::Storage;
use crate::utils::SafeSettingKey;

/// 获取公开系统设置（只读）
pub async fn get_settings(
    service: &SystemService,
    _req: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let response = SystemSettingsResponse {
        system_name: DynamicConfig::system_name().await,
        environment: config.app.environment.clone(),
        log_level: config.app.log_level.clone(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}

/// 获取当前生效的等级分数段（从高到低）
pub async fn get_grade_ranges(
    _service: &SystemService,
    _req: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match DynamicConfig::grade_ranges().await {
        Some(table) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeRangesResponse {
                ranges: table.ranges().to_vec(),
            },
            "Grade ranges retrieved successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeRangeMissing,
            "Grade range table is not configured",
        ))),
    }
}

/// 校验失败时返回 422 与全部违规项
fn violations_response(violations: &[RangeViolation]) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::error(
        ErrorCode::GradeRangeInvalid,
        GradeRangeViolationsResponse {
            violations: violations.iter().map(ToString::to_string).collect(),
        },
        "Grade range table is invalid",
    ))
}

fn client_ip(req: &HttpRequest) -> Option<String> {
    req.connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string())
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
        ErrorCode::Unauthorized,
        "用户未登录",
    ))
}

/// 替换等级分数段
pub async fn update_grade_ranges(
    req: HttpRequest,
    body: web::Json<UpdateGradeRangesRequest>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    let table = match GradeRangeTable::new(body.into_inner().ranges) {
        Ok(table) => table,
        Err(violations) => return Ok(violations_response(&violations)),
    };

    let value = match table.to_json() {
        Ok(v) => v,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("序列化等级分数段失败: {e}"),
                )),
            );
        }
    };

    let key = KnownSettingKey::GradeRanges.as_str();
    let setting = match storage
        .update_setting(key, &value, user_id, client_ip(&req))
        .await
    {
        Ok(s) => s,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新配置失败: {e}"),
                )),
            );
        }
    };

    // 更新缓存
    let ranges = table.ranges().to_vec();
    DynamicConfig::set_grade_ranges(Arc::new(table), value).await;
    info!("Grade range table replaced by user {}", user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeRangesResponse { ranges },
        format!("Setting {} updated successfully", setting.key),
    )))
}

/// 获取所有管理员配置
pub async fn get_admin_settings(
    _req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let settings = match storage.list_all_settings().await {
        Ok(s) => s,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取配置列表失败: {e}"),
                )),
            );
        }
    };

    let response = AdminSettingsListResponse { settings };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Admin settings retrieved successfully",
    )))
}

/// 更新单个配置
///
/// 等级分数段同样可以通过这里修改，写入前会做完整校验。
pub async fn update_setting(
    req: HttpRequest,
    path: SafeSettingKey,
    body: web::Json<UpdateSettingRequest>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let key = path.0;

    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    if key.parse::<KnownSettingKey>().is_err() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            ErrorCode::SettingNotFound,
            format!("未知的配置项: {key}"),
        )));
    }

    if key == KnownSettingKey::GradeRanges.as_str()
        && let Err(e) = GradeRangeTable::from_json(&body.value)
    {
        warn!("Rejected grade range update from user {}: {}", user_id, e);
        return Ok(HttpResponse::UnprocessableEntity().json(
            ApiResponse::<()>::error_empty(ErrorCode::GradeRangeInvalid, e.message()),
        ));
    }

    let setting = match storage
        .update_setting(&key, &body.value, user_id, client_ip(&req))
        .await
    {
        Ok(s) => s,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新配置失败: {e}"),
                )),
            );
        }
    };

    // 更新缓存
    DynamicConfig::update(&key, &body.value).await;

    let response = SettingResponse { setting };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Setting updated successfully",
    )))
}

/// 获取审计日志
pub async fn get_setting_audits(
    _req: HttpRequest,
    query: web::Query<SettingAuditQuery>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let audits = match storage.list_setting_audits(query.into_inner()).await {
        Ok(a) => a,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取审计日志失败: {e}"),
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        audits,
        "Setting audits retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::GradeRange;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_violations_listed_in_response() {
        let violations = GradeRangeTable::new(vec![GradeRange {
            letter: "A".to_string(),
            min: 90,
            max: 100,
            grade_points: 4.0,
        }])
        .unwrap_err();

        let resp = violations_response(&violations);
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], ErrorCode::GradeRangeInvalid as i32);
        let listed = json["data"]["violations"].as_array().unwrap();
        assert_eq!(listed.len(), violations.len());
        assert!(
            listed
                .iter()
                .any(|v| v.as_str().unwrap().starts_with("lowest range starts at 90"))
        );
    }
}
