use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::JwtConfig;
use crate::errors::{Result, TrackerError};
use crate::models::UserId;
use crate::models::auth::entities::{Principal, Role};

const ACCESS_TOKEN_TYPE: &str = "access";

// 对调用方统一返回的认证失败信息，不区分签名错误与过期
const AUTH_FAILED: &str = "Authentication required";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

/// 令牌校验器
///
/// 密钥在构造时注入，不读取全局配置，测试可以使用固定密钥。
#[derive(Clone)]
pub struct TokenAuthorizer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: chrono::Duration,
}

impl TokenAuthorizer {
    pub fn new(config: &JwtConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(TrackerError::configuration("JWT secret is not configured"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_token_expiry: chrono::Duration::minutes(config.access_token_expiry),
        })
    }

    // 生成 Access Token
    pub fn issue_access_token(&self, user_id: &UserId, role: Role) -> Result<String> {
        self.issue_token_with_expiry(user_id, role, self.access_token_expiry)
    }

    // 生成带自定义过期时间的 Token
    pub fn issue_token_with_expiry(
        &self,
        user_id: &UserId,
        role: Role,
        expiry_duration: chrono::Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TrackerError::configuration(format!("Failed to sign token: {e}")))
    }

    /// 从 Authorization 头中校验凭证
    pub fn authorize_header(&self, header: Option<&str>) -> Result<Principal> {
        let Some(value) = header else {
            info!("Authentication failed: missing Authorization header");
            return Err(TrackerError::unauthenticated(AUTH_FAILED));
        };

        // 认证方案名不区分大小写
        match value.trim().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
                self.authorize(token.trim())
            }
            _ => {
                info!("Authentication failed: Authorization header is not a bearer token");
                Err(TrackerError::unauthenticated(AUTH_FAILED))
            }
        }
    }

    /// 校验令牌并解析出主体
    pub fn authorize(&self, token: &str) -> Result<Principal> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                info!("Authentication failed: {e}");
                TrackerError::unauthenticated(AUTH_FAILED)
            })?;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            info!(
                "Authentication failed: unexpected token type {}",
                claims.token_type
            );
            return Err(TrackerError::unauthenticated(AUTH_FAILED));
        }

        let subject = UserId::parse(&claims.sub).map_err(|e| {
            info!("Authentication failed: {e}");
            TrackerError::unauthenticated(AUTH_FAILED)
        })?;

        // 只接受封闭角色集合内的角色
        let role = claims.role.parse::<Role>().map_err(|e| {
            info!("Authentication failed: {e}");
            TrackerError::unauthenticated(AUTH_FAILED)
        })?;

        Ok(Principal {
            subject,
            role,
            issued_at: timestamp(claims.iat),
            expires_at: timestamp(claims.exp),
        })
    }
}

fn timestamp(secs: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(secs as i64, 0).unwrap_or_default()
}
