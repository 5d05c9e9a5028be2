//! Register Use Case
//!
//! Creates a new, active user account. No token is issued.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::identity::UserSummary;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: UserSummary,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Validation order is email, name, password, role, then uniqueness;
    /// the first failure is reported.
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(&input.email)?;
        let name = DisplayName::new(&input.name)?;
        let password = RawPassword::new(input.password)?;
        let role: UserRole = input.role.parse()?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let hasher = self.config.password_hasher()?;
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::hash(&password, &hasher)).await??;

        let user = User::new(email, password_hash, name, role);

        // A concurrent registration can still win the race; the store's
        // unique constraint reports it as UserAlreadyExists.
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User registered"
        );

        Ok(RegisterOutput {
            user: UserSummary::from(&user),
        })
    }
}
