//! In-memory repository for tests
//!
//! Every operation yields to the scheduler before touching state, so
//! concurrent use-case calls interleave the way they would against a
//! real database. Row-level atomicity matches the Postgres store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, session_id::SessionId, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: Mutex<HashMap<UserId, User>>,
    sessions: Mutex<HashMap<SessionId, Session>>,
    fail_session_create: AtomicBool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `SessionRepository::create` fail.
    pub fn fail_session_create(&self, fail: bool) {
        self.inner.fail_session_create.store(fail, Ordering::SeqCst);
    }

    pub fn insert_session(&self, session: Session) {
        self.inner
            .sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session);
    }

    pub fn session_by_token(&self, refresh_token: &str) -> Option<Session> {
        self.inner
            .sessions
            .lock()
            .unwrap()
            .values()
            .find(|s| s.refresh_token == refresh_token)
            .cloned()
    }

    pub fn session_count(&self) -> usize {
        self.inner.sessions.lock().unwrap().len()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }
}

impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        tokio::task::yield_now().await;
        let mut users = self.inner.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        tokio::task::yield_now().await;
        Ok(self.inner.users.lock().unwrap().get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        tokio::task::yield_now().await;
        Ok(self
            .inner
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        tokio::task::yield_now().await;
        Ok(self
            .inner
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        tokio::task::yield_now().await;
        let mut users = self.inner.users.lock().unwrap();
        match users.get_mut(&user.user_id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}

impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        tokio::task::yield_now().await;
        if self.inner.fail_session_create.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("injected session store failure".into()));
        }
        self.insert_session(session.clone());
        Ok(())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AuthResult<Option<Session>> {
        tokio::task::yield_now().await;
        Ok(self.session_by_token(refresh_token))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<Session>> {
        tokio::task::yield_now().await;
        let mut sessions: Vec<Session> = self
            .inner
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn revoke(&self, session: &Session) -> AuthResult<bool> {
        tokio::task::yield_now().await;
        let mut sessions = self.inner.sessions.lock().unwrap();
        let stored = sessions
            .get_mut(&session.session_id)
            .ok_or(AuthError::SessionNotFound)?;
        if stored.is_revoked {
            return Ok(false);
        }
        stored.revoke_at(session.revoked_at.unwrap_or_else(Utc::now));
        Ok(true)
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        tokio::task::yield_now().await;
        let now = Utc::now();
        let mut revoked = 0;
        for session in self.inner.sessions.lock().unwrap().values_mut() {
            if &session.user_id == user_id && !session.is_revoked {
                session.revoke_at(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        tokio::task::yield_now().await;
        let now = Utc::now();
        let mut sessions = self.inner.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
