//! Process configuration
//!
//! Every option can be given as a flag or through the environment.
//! `.env` is loaded before parsing.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

#[derive(Debug, Parser)]
#[command(name = "auth-api")]
#[command(about = "Credential and session service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, Clone, Copy, Default, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    #[default]
    Serve,
    /// Delete expired sessions once and exit
    CleanupSessions,
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(short = 'p', long, env = "PORT", default_value_t = 8001)]
    pub port: u16,

    /// Requests still running after this many seconds are dropped.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 15)]
    pub request_timeout_secs: u64,

    /// Comma-separated list of allowed CORS origins.
    #[arg(
        long,
        env = "FRONTEND_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:40922,http://127.0.0.1:40922"
    )]
    pub frontend_origins: Vec<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,

    /// How long a request may wait for a pooled connection.
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub db_acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
            .connect(&self.database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!(
            max_connections = self.db_max_connections,
            "Connected to database"
        );
        Ok(pool)
    }
}

#[derive(Debug, Clone, Args)]
pub struct AuthArgs {
    /// HMAC-SHA256 secret for access and refresh tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    #[arg(long, env = "JWT_ACCESS_TOKEN_TTL_SECS", default_value_t = 900)]
    pub access_token_ttl_secs: u64,

    #[arg(long, env = "JWT_REFRESH_TOKEN_TTL_SECS", default_value_t = 604_800)]
    pub refresh_token_ttl_secs: u64,

    #[arg(long, env = "BCRYPT_COST", default_value_t = 12)]
    pub bcrypt_cost: u32,
}

impl AuthArgs {
    /// Build and validate the engine configuration.
    ///
    /// Without `JWT_SECRET`, debug builds sign with a random per-process
    /// secret; release builds refuse to start.
    pub fn to_auth_config(&self) -> anyhow::Result<AuthConfig> {
        let base = match &self.jwt_secret {
            Some(secret) => AuthConfig {
                jwt_secret: secret.as_bytes().to_vec(),
                ..AuthConfig::default()
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                AuthConfig::with_random_secret()
            }
            None => bail!("JWT_SECRET must be set"),
        };

        let config = AuthConfig {
            access_token_ttl: Duration::from_secs(self.access_token_ttl_secs),
            refresh_token_ttl: Duration::from_secs(self.refresh_token_ttl_secs),
            bcrypt_cost: self.bcrypt_cost,
            ..base
        };
        config.validate().context("invalid auth configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["auth-api", "--database-url", "postgres://localhost/auth"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.server.port, 8001);
        assert_eq!(cli.server.request_timeout(), Duration::from_secs(15));
        assert_eq!(cli.auth.access_token_ttl_secs, 900);
        assert_eq!(cli.auth.refresh_token_ttl_secs, 604_800);
        assert_eq!(cli.auth.bcrypt_cost, 12);
    }

    #[test]
    fn test_cleanup_subcommand() {
        let cli = parse(&["cleanup-sessions"]);
        assert!(matches!(cli.command, Some(Command::CleanupSessions)));
    }

    #[test]
    fn test_frontend_origins_split() {
        let cli = parse(&["--frontend-origins", "https://a.example,https://b.example"]);
        assert_eq!(
            cli.server.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_auth_config_from_args() {
        let cli = parse(&[
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
            "--bcrypt-cost",
            "10",
        ]);
        let config = cli.auth.to_auth_config().unwrap();
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.access_token_ttl, Duration::from_secs(900));
    }

    #[test]
    fn test_short_secret_rejected() {
        let cli = parse(&["--jwt-secret", "short"]);
        assert!(cli.auth.to_auth_config().is_err());
    }
}
