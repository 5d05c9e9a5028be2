//! Set User Status Use Case
//!
//! Lets an active admin activate or deactivate another account.
//! Deactivation also revokes all of the target's sessions, so their
//! refresh tokens stop working at once and `VerifyToken` rejects their
//! outstanding access tokens.

use std::sync::Arc;

use crate::application::identity::UserSummary;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct SetUserStatusInput {
    /// The verified caller
    pub actor_id: UserId,
    pub target_id: UserId,
    pub is_active: bool,
}

#[derive(Debug)]
pub struct SetUserStatusOutput {
    pub user: UserSummary,
    pub is_active: bool,
    pub revoked_sessions: u64,
}

pub struct SetUserStatusUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
}

impl<U, S> SetUserStatusUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    pub async fn execute(&self, input: SetUserStatusInput) -> AuthResult<SetUserStatusOutput> {
        // The role in the caller's token may be stale; check the stored one.
        let actor = self
            .user_repo
            .find_by_id(&input.actor_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !actor.is_active {
            return Err(AuthError::UserInactive);
        }
        if !actor.role.is_admin() {
            return Err(AuthError::InsufficientRole);
        }
        if actor.user_id == input.target_id && !input.is_active {
            return Err(AuthError::InsufficientRole);
        }

        let mut user = self
            .user_repo
            .find_by_id(&input.target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if input.is_active {
            user.activate();
        } else {
            user.deactivate();
        }
        self.user_repo.update(&user).await?;

        let revoked_sessions = if input.is_active {
            0
        } else {
            self.session_repo
                .revoke_all_for_user(&user.user_id)
                .await?
        };

        tracing::info!(
            actor_id = %actor.user_id,
            user_id = %user.user_id,
            is_active = user.is_active,
            revoked_sessions,
            "User status changed"
        );

        Ok(SetUserStatusOutput {
            user: UserSummary::from(&user),
            is_active: user.is_active,
            revoked_sessions,
        })
    }
}
