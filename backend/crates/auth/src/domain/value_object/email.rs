//! Email Value Object
//!
//! A normalized (trimmed, lowercased) and format-checked email address.
//! Two emails differing only in case or surrounding whitespace are the
//! same `Email`.

use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Minimum length of the top-level domain label
const TLD_MIN_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = Self::normalize(email.as_ref());

        if email.len() > EMAIL_MAX_LENGTH || !Self::is_valid_format(&email) {
            return Err(AuthError::InvalidEmail);
        }

        Ok(Self(email))
    }

    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// `local@domain.tld` where local is `[a-z0-9._%+-]+`, domain is
    /// `[a-z0-9.-]+` and the final label is at least two ASCII letters.
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        let local_ok = !local.is_empty()
            && local
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b"._%+-".contains(&b));
        if !local_ok {
            return false;
        }

        // Rejects a second '@' as well, since it is not a domain character.
        if !domain
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-')
        {
            return false;
        }

        let Some((host, tld)) = domain.rsplit_once('.') else {
            return false;
        };
        !host.is_empty()
            && tld.len() >= TLD_MIN_LENGTH
            && tld.bytes().all(|b| b.is_ascii_lowercase())
    }

    /// Rehydrate a value read back from the store.
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
