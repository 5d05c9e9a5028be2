//! Shared kernel
//!
//! Vocabulary that every backend crate agrees on:
//! - the application-wide error type and its HTTP classification
//! - phantom-typed identifiers
//!
//! Anything domain specific belongs in the owning crate, not here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
