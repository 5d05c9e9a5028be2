//! Refresh Token Use Case (rotation)
//!
//! Exchanges a refresh token for a new access/refresh pair. Each refresh
//! token is single-use: the old session is revoked before the new one is
//! written, so a failure in between leaves the caller logged out rather
//! than holding two live sessions.

use std::sync::Arc;

use chrono::Utc;

use crate::application::token::TokenIssuer;
use crate::domain::entity::session::{Session, SessionState};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct RefreshTokenInput {
    pub refresh_token: String,
}

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct RefreshTokenUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<TokenIssuer>,
}

impl<U, S> RefreshTokenUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
        }
    }

    pub async fn execute(&self, input: RefreshTokenInput) -> AuthResult<RefreshTokenOutput> {
        let mut session = self
            .session_repo
            .find_by_refresh_token(&input.refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        match session.state_at(Utc::now()) {
            SessionState::Revoked => {
                tracing::warn!(
                    session_id = %session.session_id,
                    user_id = %session.user_id,
                    "Revoked refresh token replayed"
                );
                return Err(AuthError::TokenRevoked);
            }
            SessionState::Expired => return Err(AuthError::ExpiredToken),
            SessionState::Active => {}
        }

        // The stored row is the authority; the token must still be one we
        // signed, and for the same user.
        let token_owner = self.tokens.validate_refresh_token(&input.refresh_token)?;
        if token_owner != session.user_id {
            tracing::warn!(
                session_id = %session.session_id,
                "Refresh token subject does not match session owner"
            );
            return Err(AuthError::InvalidToken);
        }

        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        let access_token = self
            .tokens
            .issue_access_token(&user.user_id, &user.email, user.role)?;
        let refresh = self.tokens.issue_refresh_token(&user.user_id)?;

        // Revoke first. Losing this conditional update means a concurrent
        // refresh of the same token already rotated it.
        session.revoke();
        match self.session_repo.revoke(&session).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    session_id = %session.session_id,
                    "Concurrent refresh lost the rotation race"
                );
                return Err(AuthError::TokenRevoked);
            }
            Err(AuthError::SessionNotFound) => return Err(AuthError::InvalidToken),
            Err(e) => return Err(e),
        }

        let new_session = Session::new(user.user_id, refresh.token.clone(), refresh.expires_at);
        self.session_repo.create(&new_session).await?;

        tracing::info!(
            user_id = %user.user_id,
            old_session_id = %session.session_id,
            new_session_id = %new_session.session_id,
            "Refresh token rotated"
        );

        Ok(RefreshTokenOutput {
            access_token,
            refresh_token: refresh.token,
        })
    }
}
