//! Login Use Case
//!
//! Verifies email and password, then opens a brand-new session. Earlier
//! sessions of the same user are left as they are.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::identity::UserSummary;
use crate::application::token::TokenIssuer;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        tokens: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed email cannot belong to anyone: same answer as unknown.
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let password = RawPassword::for_verification(input.password);
        let hasher = self.config.password_hasher()?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Pay the same bcrypt cost as a wrong password would.
            tokio::task::spawn_blocking(move || UserPassword::hash(&password, &hasher)).await??;
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        let digest = user.password_hash.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || digest.verify(&password, &hasher)).await??;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue_access_token(&user.user_id, &user.email, user.role)?;
        let refresh = self.tokens.issue_refresh_token(&user.user_id)?;

        let session = Session::new(user.user_id, refresh.token.clone(), refresh.expires_at);
        self.session_repo.create(&session).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            access_token,
            refresh_token: refresh.token,
            user: UserSummary::from(&user),
        })
    }
}
