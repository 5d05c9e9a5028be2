//! Verify Token Use Case
//!
//! Full verification of an access token for other services: signature and
//! expiry, then a fresh read of the user so that a deactivation after
//! issuance takes effect immediately.

use std::sync::Arc;

use crate::application::identity::Identity;
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct VerifyTokenInput {
    pub access_token: String,
}

#[derive(Debug)]
pub struct VerifyTokenOutput {
    pub valid: bool,
    /// Email and role as currently stored, not as encoded in the token
    pub identity: Identity,
}

pub struct VerifyTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenIssuer>,
}

impl<U> VerifyTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenIssuer>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: VerifyTokenInput) -> AuthResult<VerifyTokenOutput> {
        let claims = self.tokens.validate_access_token(&input.access_token)?;

        let user = self
            .user_repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        Ok(VerifyTokenOutput {
            valid: true,
            identity: Identity::from(&user),
        })
    }
}
