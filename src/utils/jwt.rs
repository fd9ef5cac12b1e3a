use crate::config::{AppConfig, JwtConfig};
use crate::models::users::entities::{CurrentUser, UserRole};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型，这里只接受 "access"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>, // 签发方
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    /// 转换为当前用户，sub 或 role 无法识别时返回 None
    pub fn current_user(&self) -> Option<CurrentUser> {
        let id = self.sub.parse::<i64>().ok()?;
        let role = self.role.parse::<UserRole>().ok()?;
        Some(CurrentUser { id, role })
    }
}

/// 访问令牌由外部身份服务签发，这里只负责校验
pub struct JwtUtils;

impl JwtUtils {
    /// 按配置签发 Access Token，仅用于测试
    #[cfg(test)]
    pub(crate) fn generate_with(
        config: &JwtConfig,
        user_id: i64,
        role: &UserRole,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            iss: (!config.issuer.is_empty()).then(|| config.issuer.clone()),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        };

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with(&AppConfig::get().jwt, token)
    }

    // 使用指定配置验证 Access Token：签名、过期时间、签发方、token 类型
    pub fn verify_with(
        config: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
        }

        let claims = decode::<Claims>(token, &decoding_key, &validation)?.claims;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-with-enough-length".to_string(),
            issuer: "lms-identity".to_string(),
            leeway: 0,
        }
    }

    #[test]
    fn test_generate_and_verify() {
        let cfg = config();
        let token =
            JwtUtils::generate_with(&cfg, 42, &UserRole::Teacher, chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::verify_with(&cfg, &token).unwrap();
        let user = claims.current_user().unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.role, UserRole::Teacher);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let cfg = config();
        let token =
            JwtUtils::generate_with(&cfg, 1, &UserRole::Student, chrono::Duration::minutes(5))
                .unwrap();
        let other = JwtConfig {
            secret: "another-secret-value".to_string(),
            ..config()
        };
        assert!(JwtUtils::verify_with(&other, &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config();
        let token =
            JwtUtils::generate_with(&cfg, 1, &UserRole::Student, chrono::Duration::minutes(-10))
                .unwrap();
        assert!(JwtUtils::verify_with(&cfg, &token).is_err());
    }

    #[test]
    fn test_issuer_checked() {
        let issued = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config()
        };
        let token =
            JwtUtils::generate_with(&issued, 1, &UserRole::Admin, chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::verify_with(&config(), &token).is_err());
    }

    #[test]
    fn test_unknown_role_has_no_current_user() {
        let claims = Claims {
            sub: "7".to_string(),
            role: "guest".to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            iss: None,
            exp: 0,
            iat: 0,
        };
        assert!(claims.current_user().is_none());
    }
}
