//! Display Name Value Object
//!
//! Free-form name shown to other users. Surrounding whitespace is trimmed
//! and the remainder must be 2 to 100 characters long.

use std::fmt;

use crate::error::{AuthError, AuthResult};

pub const DISPLAY_NAME_MIN_LENGTH: usize = 2;
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl AsRef<str>) -> AuthResult<Self> {
        let trimmed = name.as_ref().trim();
        let length = trimmed.chars().count();

        if length < DISPLAY_NAME_MIN_LENGTH {
            return Err(AuthError::NameTooShort);
        }
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(AuthError::NameTooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
