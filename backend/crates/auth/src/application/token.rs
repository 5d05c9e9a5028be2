//! Token Issuer / Validator
//!
//! Access and refresh tokens share one HS256 secret but have different
//! claim shapes and lifetimes. Refresh claims carry no email or role: a
//! refresh token only authorizes anything once it has been resolved
//! through the session store.

use chrono::{DateTime, Utc};
use platform::jwt::JwtCodec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    /// Unique per token, so two refresh tokens are never equal
    pub jti: Uuid,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// A signed refresh token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: JwtCodec,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            codec: JwtCodec::hs256(&config.jwt_secret),
            access_ttl_secs: ttl_secs(config.access_token_ttl),
            refresh_ttl_secs: ttl_secs(config.refresh_token_ttl),
        }
    }

    pub fn issue_access_token(
        &self,
        user_id: &UserId,
        email: &Email,
        role: UserRole,
    ) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: *user_id.as_uuid(),
            email: email.as_str().to_string(),
            role,
            iat: now,
            nbf: now,
            exp: now + self.access_ttl_secs,
        };
        Ok(self.codec.encode(&claims)?)
    }

    /// The returned expiry equals the encoded `exp`, at second precision.
    pub fn issue_refresh_token(&self, user_id: &UserId) -> AuthResult<IssuedRefreshToken> {
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            sub: *user_id.as_uuid(),
            jti: Uuid::new_v4(),
            iat: now,
            nbf: now,
            exp: now + self.refresh_ttl_secs,
        };
        let token = self.codec.encode(&claims)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::Internal("refresh token expiry out of range".into()))?;

        Ok(IssuedRefreshToken { token, expires_at })
    }

    /// `ExpiredToken` only when the signature and algorithm check out and
    /// the expiry alone has passed. Everything else is `InvalidToken`.
    pub fn validate_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        Ok(self.codec.decode::<AccessClaims>(token)?)
    }

    pub fn validate_refresh_token(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.codec.decode::<RefreshClaims>(token)?;
        Ok(UserId::from_uuid(claims.sub))
    }
}

fn ttl_secs(ttl: std::time::Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX / 2)
}
