//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod shutdown;

use anyhow::Context;
use auth::{CleanupExpiredSessionsUseCase, PgAuthRepository, auth_router};
use axum::{
    Json, Router,
    extract::State,
    http::{self, Method, StatusCode, header},
    routing::get,
};
use clap::Parser;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, Command, ServerConfig};
use crate::shutdown::shutdown_signal;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let pool = cli.database.connect().await?;

    match cli.command.unwrap_or_default() {
        Command::Serve => serve(&cli, pool).await,
        Command::CleanupSessions => {
            let deleted = cleanup_sessions(&pool).await?;
            tracing::info!(sessions_deleted = deleted, "Expired session cleanup completed");
            Ok(())
        }
    }
}

async fn serve(cli: &Cli, pool: PgPool) -> anyhow::Result<()> {
    let auth_config = cli.auth.to_auth_config()?;

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    tracing::info!("Migrations completed");

    // Startup cleanup: errors here should not prevent server startup
    match cleanup_sessions(&pool).await {
        Ok(deleted) => {
            tracing::info!(sessions_deleted = deleted, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    let app = Router::new()
        .route("/health", get(health))
        .with_state(pool.clone())
        .nest(
            "/api/v1/auth",
            auth_router(PgAuthRepository::new(pool), auth_config),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            cli.server.request_timeout(),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&cli.server));

    let addr = cli.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn cleanup_sessions(pool: &PgPool) -> anyhow::Result<u64> {
    let repo = Arc::new(PgAuthRepository::new(pool.clone()));
    let deleted = CleanupExpiredSessionsUseCase::new(repo).execute().await?;
    Ok(deleted)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = server
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

/// GET /health
async fn health(State(pool): State<PgPool>) -> AppResult<Json<Value>> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::service_unavailable("Database unavailable").with_source(e))?;

    Ok(Json(json!({ "status": "ok" })))
}
