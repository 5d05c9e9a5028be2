//! Request Extractors
//!
//! Bearer credentials are read from the `Authorization` header only.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use platform::bearer::extract_bearer;

use crate::application::Identity;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// `Json` whose rejection renders as an `INVALID_REQUEST` problem body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct ApiJson<T>(pub T);

/// `Path` whose rejection renders as an `INVALID_REQUEST` problem body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AuthError))]
pub struct ApiPath<T>(pub T);

/// Raw bearer token, not yet verified.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?;
        Ok(BearerToken(token.to_string()))
    }
}

/// Caller identity taken from a valid access token.
///
/// Only the signature and lifetime of the token are checked here; use
/// cases that need the stored account state load it themselves.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl<R> FromRequestParts<AuthAppState<R>> for AuthenticatedUser
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AuthAppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?;
        let claims = state.tokens.validate_access_token(token)?;
        Ok(AuthenticatedUser(Identity::from(claims)))
    }
}
