//! User Entity
//!
//! Identity record. Users are never hard-deleted; deactivation is how an
//! account is disabled.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, stored normalized
    pub email: Email,
    pub password_hash: UserPassword,
    pub name: DisplayName,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Advances on every mutation
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New users are always active.
    pub fn new(
        email: Email,
        password_hash: UserPassword,
        name: DisplayName,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            name,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        // Never move backwards, even if the wall clock does.
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            Email::new("alice@example.com").unwrap(),
            UserPassword::from_db("$2b$04$digest"),
            DisplayName::new("Alice").unwrap(),
            UserRole::Viewer,
        )
    }

    #[test]
    fn test_new_user_is_active() {
        let user = user();
        assert!(user.is_active);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_mutations_advance_updated_at() {
        let mut user = user();
        let created = user.updated_at;

        user.deactivate();
        assert!(!user.is_active);
        assert!(user.updated_at >= created);

        let before = user.updated_at;
        user.activate();
        assert!(user.is_active);
        assert!(user.updated_at >= before);
        assert_eq!(user.created_at, created);
    }
}
