//! Application Configuration
//!
//! Values the engine consumes. Loading them from the environment is the
//! binary's job; this crate only receives them.

use std::fmt;
use std::time::Duration;

use platform::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST, PasswordHashError, PasswordHasher};
use thiserror::Error;

/// Minimum HS256 secret length in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("JWT secret must be at least {MIN_SECRET_LENGTH} bytes (got {0})")]
    SecretTooShort(usize),

    #[error("{0} must be at least one second")]
    TtlTooShort(&'static str),

    #[error("bcrypt cost must be within {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST} (got {0})")]
    InvalidBcryptCost(u32),
}

#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret shared by access and refresh tokens
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token and session lifetime (7 days)
    pub refresh_token_ttl: Duration,
    /// bcrypt cost factor (12)
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; MIN_SECRET_LENGTH],
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            bcrypt_cost: bcrypt_default_cost(),
        }
    }
}

impl AuthConfig {
    /// Default lifetimes with a random secret. Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; MIN_SECRET_LENGTH];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Random secret and the cheapest bcrypt cost.
    pub fn development() -> Self {
        Self {
            bcrypt_cost: MIN_BCRYPT_COST,
            ..Self::with_random_secret()
        }
    }

    pub fn password_hasher(&self) -> Result<PasswordHasher, PasswordHashError> {
        PasswordHasher::new(self.bcrypt_cost)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort(self.jwt_secret.len()));
        }
        if self.access_token_ttl.as_secs() == 0 {
            return Err(ConfigError::TtlTooShort("access token TTL"));
        }
        if self.refresh_token_ttl.as_secs() == 0 {
            return Err(ConfigError::TtlTooShort("refresh token TTL"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.bcrypt_cost));
        }
        Ok(())
    }
}

fn bcrypt_default_cost() -> u32 {
    PasswordHasher::default().cost()
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
