//! Caller identity and public user fields

use crate::application::token::AccessClaims;
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_role::UserRole,
};

/// An authenticated principal, produced by token verification and passed
/// explicitly into every operation that acts on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Email,
    pub role: UserRole,
}

impl From<AccessClaims> for Identity {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id(),
            email: Email::from_db(claims.email),
            role: claims.role,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Fields of a user that may be shown to the user themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: UserId,
    pub email: Email,
    pub name: DisplayName,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
