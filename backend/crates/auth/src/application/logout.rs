//! Logout Use Case
//!
//! Revokes every session of the caller, on every device.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

pub struct LogoutInput {
    /// Taken from the caller's already-verified identity
    pub user_id: UserId,
}

pub struct LogoutOutput {
    pub revoked_sessions: u64,
}

pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, input: LogoutInput) -> AuthResult<LogoutOutput> {
        let revoked_sessions = self
            .session_repo
            .revoke_all_for_user(&input.user_id)
            .await?;

        tracing::info!(
            user_id = %input.user_id,
            revoked_sessions,
            "User logged out"
        );

        Ok(LogoutOutput { revoked_sessions })
    }
}
