//! Expired Session Sweep
//!
//! Deletes sessions past their expiry. Idempotent and safe to run at any
//! time; scheduling is left to the caller.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

pub struct CleanupExpiredSessionsUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> CleanupExpiredSessionsUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Returns the number of sessions deleted.
    pub async fn execute(&self) -> AuthResult<u64> {
        let deleted = self.session_repo.delete_expired().await?;
        tracing::debug!(deleted, "Expired sessions swept");
        Ok(deleted)
    }
}
