//! Password Hashing and Verification
//!
//! Password handling for account credentials:
//! - bcrypt hashing with a configurable cost factor
//! - NFKC normalization so visually identical input hashes identically
//! - zeroization of the clear text on drop
//! - a composition policy (length, upper, lower, digit)
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are
//! rejected by the policy and never verify, so two passwords sharing a
//! 72-byte prefix cannot be confused.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt input limit, in bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} bytes")]
    TooLong { max: usize },

    /// Missing an uppercase letter, a lowercase letter or a digit
    #[error("Password must contain an uppercase letter, a lowercase letter and a digit")]
    TooWeak,
}

/// Password hashing/verification errors
///
/// A wrong password is never an error; see [`PasswordHasher::verify`].
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("bcrypt cost {0} is outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}")]
    InvalidCost(u32),

    #[error("Password exceeds {MAX_PASSWORD_BYTES} bytes")]
    InputTooLong,

    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` is redacted.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Passw0rd!".to_string());
/// assert!(password.check_policy().is_ok());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap raw input, applying NFKC normalization. No policy is checked.
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Composition policy, checked in order: length, byte limit, character classes.
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let char_count = self.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if self.0.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
            });
        }

        let has_upper = self.0.chars().any(char::is_uppercase);
        let has_lower = self.0.chars().any(char::is_lowercase);
        let has_digit = self.0.chars().any(|c| c.is_ascii_digit());
        if !(has_upper && has_lower && has_digit) {
            return Err(PasswordPolicyError::TooWeak);
        }

        Ok(())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// bcrypt hasher with a cost fixed at construction.
///
/// `Copy`, so it can be moved into `spawn_blocking` closures freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted, self-describing `$2b$` digest.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<String, PasswordHashError> {
        if password.as_bytes().len() > MAX_PASSWORD_BYTES {
            return Err(PasswordHashError::InputTooLong);
        }
        Ok(bcrypt::hash(password.as_bytes(), self.cost)?)
    }

    /// `Ok(false)` on mismatch. `Err` only when the digest is unreadable.
    ///
    /// The cost used is the one embedded in the digest, so digests created
    /// under an older cost keep verifying.
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        digest: &str,
    ) -> Result<bool, PasswordHashError> {
        if password.as_bytes().len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        Ok(bcrypt::verify(password.as_bytes(), digest)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_BCRYPT_COST).unwrap()
    }

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string())
    }

    #[test]
    fn test_policy_too_short() {
        assert_eq!(
            pw("Ab1").check_policy(),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 3 })
        );
    }

    #[test]
    fn test_policy_counts_characters_not_bytes() {
        // 7 characters, 21 bytes
        assert!(matches!(
            pw("パスワードA1").check_policy(),
            Err(PasswordPolicyError::TooShort { actual: 7, .. })
        ));
    }

    #[test]
    fn test_policy_too_long() {
        let long = format!("Aa1{}", "x".repeat(MAX_PASSWORD_BYTES));
        assert_eq!(
            pw(&long).check_policy(),
            Err(PasswordPolicyError::TooLong { max: 72 })
        );
    }

    #[test]
    fn test_policy_requires_each_class() {
        for weak in ["alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
            assert_eq!(pw(weak).check_policy(), Err(PasswordPolicyError::TooWeak), "{weak}");
        }
        assert!(pw("Passw0rd!").check_policy().is_ok());
    }

    #[test]
    fn test_short_and_weak_reports_short_first() {
        assert!(matches!(
            pw("abc").check_policy(),
            Err(PasswordPolicyError::TooShort { .. })
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = pw("Passw0rd!");
        let digest = hasher.hash(&password).unwrap();

        assert_ne!(digest, "Passw0rd!");
        assert!(digest.starts_with("$2"));
        assert!(hasher.verify(&password, &digest).unwrap());
        assert!(!hasher.verify(&pw("Passw0rd?"), &digest).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();
        let a = hasher.hash(&pw("Passw0rd!")).unwrap();
        let b = hasher.hash(&pw("Passw0rd!")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_uses_digest_cost() {
        let digest = PasswordHasher::new(5).unwrap().hash(&pw("Passw0rd!")).unwrap();
        assert!(fast_hasher().verify(&pw("Passw0rd!"), &digest).unwrap());
    }

    #[test]
    fn test_nfkc_equivalent_input_verifies() {
        let hasher = fast_hasher();
        // Fullwidth digits normalize to ASCII under NFKC.
        let digest = hasher.hash(&pw("Passw０rd!")).unwrap();
        assert!(hasher.verify(&pw("Passw0rd!"), &digest).unwrap());
    }

    #[test]
    fn test_overlong_input_never_verifies() {
        let hasher = fast_hasher();
        let base = format!("Aa1{}", "x".repeat(MAX_PASSWORD_BYTES - 3));
        let digest = hasher.hash(&pw(&base)).unwrap();
        let longer = format!("{base}tail");
        assert!(!hasher.verify(&pw(&longer), &digest).unwrap());
        assert!(matches!(
            hasher.hash(&pw(&longer)),
            Err(PasswordHashError::InputTooLong)
        ));
    }

    #[test]
    fn test_malformed_digest_is_error() {
        let result = fast_hasher().verify(&pw("Passw0rd!"), "not_a_bcrypt_digest");
        assert!(matches!(result, Err(PasswordHashError::Bcrypt(_))));
    }

    #[test]
    fn test_cost_bounds() {
        assert!(matches!(PasswordHasher::new(3), Err(PasswordHashError::InvalidCost(3))));
        assert!(matches!(PasswordHasher::new(32), Err(PasswordHashError::InvalidCost(32))));
        assert_eq!(PasswordHasher::default().cost(), 12);
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", pw("Passw0rd!"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("Passw0rd"));
    }
}
