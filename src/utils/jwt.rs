use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub email: String,      // 账号邮箱，授权检查以此为准
    pub username: String,   // 用户名
    pub token_type: String, // token类型
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        email: &str,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_secret(
            &Self::get_secret(),
            user_id,
            email,
            username,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 使用指定密钥与过期时间生成 Token
    pub fn generate_token_with_secret(
        secret: &str,
        user_id: i64,
        email: &str,
        username: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(&Self::get_secret(), token)
    }

    // 使用指定密钥验证签名、过期时间与类型
    pub fn verify_with_secret(
        secret: &str,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        let claims =
            decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)?;
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

    #[test]
    fn test_issue_and_validate() {
        let token = JwtUtils::generate_token_with_secret(
            "test-secret",
            7,
            "prof@school.ro",
            "Ana_Pop",
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify_with_secret("test-secret", &token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "prof@school.ro");
        assert_eq!(claims.username, "Ana_Pop");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtUtils::generate_token_with_secret(
            "test-secret",
            7,
            "prof@school.ro",
            "Ana_Pop",
            chrono::Duration::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret("other-secret", &token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = JwtUtils::generate_token_with_secret(
            "test-secret",
            7,
            "prof@school.ro",
            "Ana_Pop",
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret("test-secret", &token).is_err());
    }
}
