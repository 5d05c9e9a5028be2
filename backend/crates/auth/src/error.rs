//! Auth Error Types
//!
//! Every failure the credential and session engine can report. Variants
//! convert into `kernel::error::AppError` at the HTTP boundary, each with a
//! stable machine-readable code.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::BearerError;
use platform::jwt::TokenError;
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    // ------------------------------------------------------------------
    // Input validation
    // ------------------------------------------------------------------
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Password must be at most 72 bytes")]
    PasswordTooLong,

    #[error("Password must contain an uppercase letter, a lowercase letter and a digit")]
    PasswordTooWeak,

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Name must be at most 100 characters")]
    NameTooLong,

    #[error("Role must be one of admin, operator, analyst, viewer")]
    InvalidRole,

    /// Body or path could not be parsed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ------------------------------------------------------------------
    // Identity state
    // ------------------------------------------------------------------
    #[error("A user with this email already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("User account is inactive")]
    UserInactive,

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Insufficient role for this operation")]
    InsufficientRole,

    // ------------------------------------------------------------------
    // Token state
    // ------------------------------------------------------------------
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token has been revoked")]
    TokenRevoked,

    /// Store-level miss. Reported to refresh callers as `InvalidToken`.
    #[error("Session not found")]
    SessionNotFound,

    #[error("Authorization header is missing")]
    MissingAuthorization,

    #[error("Authorization header must be 'Bearer <token>'")]
    MalformedAuthorization,

    // ------------------------------------------------------------------
    // Opaque internal failures
    // ------------------------------------------------------------------
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail
            | AuthError::PasswordTooShort
            | AuthError::PasswordTooLong
            | AuthError::PasswordTooWeak
            | AuthError::NameTooShort
            | AuthError::NameTooLong
            | AuthError::InvalidRole
            | AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserInactive | AuthError::InsufficientRole => ErrorKind::Forbidden,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::TokenRevoked
            | AuthError::SessionNotFound
            | AuthError::MissingAuthorization
            | AuthError::MalformedAuthorization => ErrorKind::Unauthorized,
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable code carried in the problem-details body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "INVALID_EMAIL",
            AuthError::PasswordTooShort => "PASSWORD_TOO_SHORT",
            AuthError::PasswordTooLong => "PASSWORD_TOO_LONG",
            AuthError::PasswordTooWeak => "PASSWORD_TOO_WEAK",
            AuthError::NameTooShort => "NAME_TOO_SHORT",
            AuthError::NameTooLong => "NAME_TOO_LONG",
            AuthError::InvalidRole => "INVALID_ROLE",
            AuthError::InvalidRequest(_) => "INVALID_REQUEST",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserInactive => "USER_INACTIVE",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InsufficientRole => "INSUFFICIENT_ROLE",
            AuthError::InvalidToken | AuthError::SessionNotFound => "INVALID_TOKEN",
            AuthError::ExpiredToken => "EXPIRED_TOKEN",
            AuthError::TokenRevoked => "TOKEN_REVOKED",
            AuthError::MissingAuthorization | AuthError::MalformedAuthorization => "UNAUTHORIZED",
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::TokenRevoked => {
                tracing::warn!("Revoked refresh token presented");
            }
            AuthError::UserInactive => {
                tracing::warn!("Inactive account attempted authentication");
            }
            AuthError::InsufficientRole => {
                tracing::warn!("Operation rejected for insufficient role");
            }
            AuthError::InvalidCredentials => {
                tracing::info!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let code = err.code();
        match err {
            // Pool exhaustion and outages keep their 503 classification.
            AuthError::Database(e) => AppError::from(e).with_code(code),
            AuthError::PasswordHash(e) => AppError::internal("Password hashing failed")
                .with_code(code)
                .with_source(e),
            other => AppError::new(other.kind(), other.to_string()).with_code(code),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        match err {
            PasswordPolicyError::TooShort { .. } => AuthError::PasswordTooShort,
            PasswordPolicyError::TooLong { .. } => AuthError::PasswordTooLong,
            PasswordPolicyError::TooWeak => AuthError::PasswordTooWeak,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Invalid(reason) => {
                tracing::debug!(reason = %reason, "Token rejected");
                AuthError::InvalidToken
            }
            TokenError::Encoding(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthError::MissingAuthorization,
            BearerError::Malformed => AuthError::MalformedAuthorization,
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {err}"))
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AuthError {
    fn from(rejection: PathRejection) -> Self {
        AuthError::InvalidRequest(rejection.body_text())
    }
}
