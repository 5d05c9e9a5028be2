//! Repository Traits
//!
//! Persistence interfaces for users and sessions. The Postgres
//! implementation lives in `infra`. Each method is a single store
//! operation; the engine relies on the store's per-row atomicity and
//! holds no locks of its own.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A taken email is `AuthError::UserAlreadyExists`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist all mutable fields. `AuthError::UserNotFound` if the row is gone.
    async fn update(&self, user: &User) -> AuthResult<()>;
}

#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Exact match on the token string, whatever the session's state.
    async fn find_by_refresh_token(&self, refresh_token: &str) -> AuthResult<Option<Session>>;

    /// Newest first.
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<Session>>;

    /// Conditionally mark one session revoked.
    ///
    /// `Ok(true)` only for the call that performed the transition,
    /// `Ok(false)` if it was already revoked, `AuthError::SessionNotFound`
    /// if no such session exists.
    async fn revoke(&self, session: &Session) -> AuthResult<bool>;

    /// Revoke every unrevoked session of the user. Returns how many changed.
    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Delete sessions whose expiry has passed. Idempotent.
    async fn delete_expired(&self) -> AuthResult<u64>;
}
