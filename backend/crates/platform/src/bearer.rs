//! Bearer credential extraction
//!
//! Parses `Authorization: Bearer <token>` strictly: the header must split
//! on a single space into exactly two parts and the scheme must be
//! `Bearer`. Nothing about the token itself is inspected here.

use axum::http::{HeaderMap, header};
use thiserror::Error;

pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header must be 'Bearer <token>'")]
    Malformed,
}

/// Borrow the token from the `Authorization` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
