//! User Password Value Objects
//!
//! `RawPassword` is the caller's clear text, `UserPassword` the stored
//! bcrypt digest. Hashing and verification delegate to
//! `platform::password` and are CPU-bound: call them off the async
//! executor.

use std::fmt;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::error::AuthResult;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Clear text from user input, zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// For new credentials: enforces the composition policy.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw);
        clear_text.check_policy()?;
        Ok(Self(clear_text))
    }

    /// For checking an existing credential. The policy is not applied so a
    /// login attempt never reveals policy details.
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored bcrypt digest (`$2b$<cost>$<salt+hash>`).
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(String);

impl UserPassword {
    pub fn hash(raw: &RawPassword, hasher: &PasswordHasher) -> AuthResult<Self> {
        Ok(Self(hasher.hash(&raw.0)?))
    }

    pub fn from_db(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Ok(false)` on mismatch. Fails only for an unreadable digest.
    pub fn verify(&self, raw: &RawPassword, hasher: &PasswordHasher) -> AuthResult<bool> {
        Ok(hasher.verify(&raw.0, &self.0)?)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4).unwrap()
    }

    #[test]
    fn test_policy_errors_map_to_auth_errors() {
        assert!(matches!(
            RawPassword::new("Sh0rt".into()),
            Err(AuthError::PasswordTooShort)
        ));
        assert!(matches!(
            RawPassword::new("longbutweak".into()),
            Err(AuthError::PasswordTooWeak)
        ));
        assert!(matches!(
            RawPassword::new(format!("Aa1{}", "z".repeat(80))),
            Err(AuthError::PasswordTooLong)
        ));
    }

    #[test]
    fn test_hash_never_equals_plaintext_and_verifies() {
        let raw = RawPassword::new("Passw0rd!".into()).unwrap();
        let stored = UserPassword::hash(&raw, &hasher()).unwrap();
        assert_ne!(stored.as_str(), "Passw0rd!");
        assert!(stored.verify(&raw, &hasher()).unwrap());

        let wrong = RawPassword::for_verification("passw0rd!".into());
        assert!(!stored.verify(&wrong, &hasher()).unwrap());
    }

    #[test]
    fn test_verification_skips_policy() {
        let raw = RawPassword::for_verification("x".into());
        let stored = UserPassword::from_db(
            UserPassword::hash(&RawPassword::new("Passw0rd!".into()).unwrap(), &hasher())
                .unwrap()
                .as_str(),
        );
        assert!(!stored.verify(&raw, &hasher()).unwrap());
    }

    #[test]
    fn test_corrupt_digest_is_internal_error() {
        let raw = RawPassword::for_verification("Passw0rd!".into());
        let stored = UserPassword::from_db("garbage");
        assert!(matches!(
            stored.verify(&raw, &hasher()),
            Err(AuthError::PasswordHash(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Passw0rd!".into()).unwrap();
        assert!(!format!("{raw:?}").contains("Passw0rd"));
        let stored = UserPassword::hash(&raw, &hasher()).unwrap();
        assert!(!format!("{stored:?}").contains("$2"));
    }
}
