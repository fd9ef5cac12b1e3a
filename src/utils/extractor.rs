//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，配置 key 必须是 `section.name` 形式。
//! 解析失败时直接返回统一格式的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static SETTING_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)+$").expect("Invalid setting key regex")
});

/// 构造参数错误
pub fn bad_path_parameter(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 解析正整数 ID
pub fn parse_positive_i64(name: &str, raw: &str) -> Result<i64, String> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid path parameter '{name}': {raw}")),
    }
}

/// 定义一个从路径参数中提取正整数 ID 的类型
///
/// 生成的类型既可以直接作为处理函数参数，也可以放进 `web::Path<(A, B)>` 中使用。
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = futures_util::future::Ready<::std::result::Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                futures_util::future::ready(
                    $crate::utils::extractor::parse_positive_i64($param, raw)
                        .map($name)
                        .map_err($crate::utils::extractor::bad_path_parameter),
                )
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                $crate::utils::extractor::parse_positive_i64($param, &raw)
                    .map($name)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeOtherGradeIdI64, "other_grade_id");

/// 系统设置 key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeSettingKey(pub String);

impl FromRequest for SafeSettingKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("key").unwrap_or_default();
        if SETTING_KEY_RE.is_match(raw) {
            ready(Ok(SafeSettingKey(raw.to_string())))
        } else {
            ready(Err(bad_path_parameter(format!(
                "Invalid setting key: {raw}"
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_i64() {
        assert_eq!(parse_positive_i64("id", "12"), Ok(12));
        assert!(parse_positive_i64("id", "0").is_err());
        assert!(parse_positive_i64("id", "-3").is_err());
        assert!(parse_positive_i64("id", "abc").is_err());
    }

    #[actix_web::test]
    async fn test_course_id_extractor() {
        let (req, mut payload) = TestRequest::default()
            .param("course_id", "7")
            .to_http_parts();
        let id = SafeCourseIdI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id.0, 7);

        let (req, mut payload) = TestRequest::default()
            .param("course_id", "x")
            .to_http_parts();
        assert!(SafeCourseIdI64::from_request(&req, &mut payload).await.is_err());
    }

    #[actix_web::test]
    async fn test_setting_key_extractor() {
        let (req, mut payload) = TestRequest::default()
            .param("key", "grading.grade_ranges")
            .to_http_parts();
        let key = SafeSettingKey::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(key.0, "grading.grade_ranges");

        let (req, mut payload) = TestRequest::default()
            .param("key", "../etc")
            .to_http_parts();
        assert!(SafeSettingKey::from_request(&req, &mut payload).await.is_err());
    }

    #[test]
    fn test_deserialize_from_path_segment() {
        let id: SafeStudentIdI64 = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(id.0, 42);
        assert!(serde_json::from_str::<SafeStudentIdI64>(r#""0""#).is_err());
    }
}
