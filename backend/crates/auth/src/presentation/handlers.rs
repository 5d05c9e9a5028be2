//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    ListSessionsInput, ListSessionsUseCase, LoginInput, LoginUseCase, LogoutInput, LogoutUseCase,
    RefreshTokenInput, RefreshTokenUseCase, RegisterInput, RegisterUseCase, SetUserStatusInput,
    SetUserStatusUseCase, TokenIssuer, VerifyTokenInput, VerifyTokenUseCase,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    SessionResponse, TokenPairResponse, UpdateUserStatusRequest, UserResponse,
    UserStatusResponse, VerifyResponse,
};
use crate::presentation::extract::{ApiJson, ApiPath, AuthenticatedUser, BearerToken};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<MessageResponse<UserResponse>>)>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        name: req.name,
        role: req.role,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "User registered successfully",
            Some(UserResponse::from(output.user)),
        )),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AuthResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user: UserResponse::from(output.user),
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/v1/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<RefreshTokenRequest>,
) -> AuthResult<Json<TokenPairResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RefreshTokenUseCase::new(state.repo.clone(), state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(RefreshTokenInput {
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(Json(TokenPairResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
    }))
}

// ============================================================================
// Verify
// ============================================================================

/// GET /api/v1/auth/verify
pub async fn verify<R>(
    State(state): State<AuthAppState<R>>,
    BearerToken(access_token): BearerToken,
) -> AuthResult<Json<VerifyResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyTokenUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case.execute(VerifyTokenInput { access_token }).await?;

    Ok(Json(VerifyResponse::new(output.valid, output.identity)))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/v1/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> AuthResult<Json<MessageResponse<()>>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());

    use_case
        .execute(LogoutInput {
            user_id: identity.user_id,
        })
        .await?;

    Ok(Json(MessageResponse::new("Logged out successfully", None)))
}

// ============================================================================
// Sessions (requires authentication)
// ============================================================================

/// GET /api/v1/auth/sessions
pub async fn list_sessions<R>(
    State(state): State<AuthAppState<R>>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> AuthResult<Json<Vec<SessionResponse>>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListSessionsUseCase::new(state.repo.clone());

    let sessions = use_case
        .execute(ListSessionsInput {
            user_id: identity.user_id,
        })
        .await?;

    Ok(Json(sessions.into_iter().map(SessionResponse::from).collect()))
}

// ============================================================================
// User Status (admin only)
// ============================================================================

/// PATCH /api/v1/auth/users/{user_id}/status
pub async fn set_user_status<R>(
    State(state): State<AuthAppState<R>>,
    AuthenticatedUser(identity): AuthenticatedUser,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateUserStatusRequest>,
) -> AuthResult<Json<UserStatusResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SetUserStatusUseCase::new(state.repo.clone(), state.repo.clone());

    let output = use_case
        .execute(SetUserStatusInput {
            actor_id: identity.user_id,
            target_id: UserId::from(user_id),
            is_active: req.is_active,
        })
        .await?;

    Ok(Json(UserStatusResponse {
        user: UserResponse::from(output.user),
        is_active: output.is_active,
        revoked_sessions: output.revoked_sessions,
    }))
}
