//! Session Entity
//!
//! One refresh-token grant. A session is valid iff it is not revoked and
//! `now < expires_at`; validity is derived on every read and never stored.
//! Revocation is one-way.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

/// Derived state of a session at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Revoked,
    Expired,
}

impl SessionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionState::Active => "active",
            SessionState::Revoked => "revoked",
            SessionState::Expired => "expired",
        }
    }
}

#[derive(Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Bearer string; unique across all sessions
    pub refresh_token: String,
    /// Equal to the refresh token's own `exp`
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: UserId, refresh_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            refresh_token,
            expires_at,
            created_at: Utc::now(),
            is_revoked: false,
            revoked_at: None,
        }
    }

    /// Idempotent: a second call keeps the original `revoked_at`.
    pub fn revoke(&mut self) {
        self.revoke_at(Utc::now());
    }

    pub fn revoke_at(&mut self, now: DateTime<Utc>) {
        if self.is_revoked {
            return;
        }
        self.is_revoked = true;
        self.revoked_at = Some(now);
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == SessionState::Active
    }

    /// Revocation is reported ahead of expiry.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if self.is_revoked {
            SessionState::Revoked
        } else if self.is_expired_at(now) {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .field("is_revoked", &self.is_revoked)
            .field("revoked_at", &self.revoked_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session_expiring_in(ttl: Duration) -> Session {
        Session::new(UserId::new(), "token".to_string(), Utc::now() + ttl)
    }

    #[test]
    fn test_new_session_is_valid() {
        let session = session_expiring_in(Duration::days(7));
        assert!(!session.is_revoked);
        assert!(session.revoked_at.is_none());
        assert!(session.is_valid());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let session = session_expiring_in(Duration::hours(1));
        let at = session.expires_at;
        assert!(!session.is_expired_at(at - Duration::milliseconds(1)));
        assert!(session.is_expired_at(at));
        assert_eq!(session.state_at(at), SessionState::Expired);
    }

    #[test]
    fn test_revoke_is_idempotent_and_monotonic() {
        let mut session = session_expiring_in(Duration::hours(1));
        let first = Utc::now();
        session.revoke_at(first);
        session.revoke_at(first + Duration::minutes(5));

        assert!(session.is_revoked);
        assert_eq!(session.revoked_at, Some(first));
        assert!(!session.is_valid_at(first - Duration::minutes(1)));
    }

    #[test]
    fn test_revoked_wins_over_expired() {
        let mut session = session_expiring_in(Duration::seconds(-10));
        assert_eq!(session.state_at(Utc::now()), SessionState::Expired);
        session.revoke();
        assert_eq!(session.state_at(Utc::now()), SessionState::Revoked);
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new(UserId::new(), "secret-refresh".into(), Utc::now());
        assert!(!format!("{session:?}").contains("secret-refresh"));
    }
}
