//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token issuance, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, extractors, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HS256 access tokens
//! - Server-side refresh sessions, rotated on every refresh
//! - Role-based access (Admin, Operator, Analyst, Viewer)
//!
//! ## Security Model
//! - Passwords hashed with bcrypt, off the async executor
//! - A refresh token is usable exactly once; replay yields `TokenRevoked`
//! - Rotation fails closed: the old session is revoked before the new one exists
//! - Unknown email and wrong password are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::cleanup_sessions::CleanupExpiredSessionsUseCase;
pub use application::config::{AuthConfig, ConfigError};
pub use application::token::TokenIssuer;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
