//! List Sessions Use Case
//!
//! The caller's own sessions with their derived state. Token strings are
//! never returned.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::session::SessionState;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::AuthResult;

pub struct ListSessionsInput {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub state: SessionState,
}

pub struct ListSessionsUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> ListSessionsUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, input: ListSessionsInput) -> AuthResult<Vec<SessionSummary>> {
        let now = Utc::now();
        let sessions = self.session_repo.find_by_user_id(&input.user_id).await?;

        Ok(sessions
            .into_iter()
            .map(|session| SessionSummary {
                session_id: session.session_id,
                created_at: session.created_at,
                expires_at: session.expires_at,
                revoked_at: session.revoked_at,
                state: session.state_at(now),
            })
            .collect())
    }
}
