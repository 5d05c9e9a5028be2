//! Application Layer
//!
//! Use cases and application services.

pub mod cleanup_sessions;
pub mod config;
pub mod identity;
pub mod list_sessions;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod set_user_status;
pub mod token;
pub mod verify_token;

// Re-exports
pub use cleanup_sessions::CleanupExpiredSessionsUseCase;
pub use config::{AuthConfig, ConfigError};
pub use identity::{Identity, UserSummary};
pub use list_sessions::{ListSessionsInput, ListSessionsUseCase, SessionSummary};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::{LogoutInput, LogoutOutput, LogoutUseCase};
pub use refresh_token::{RefreshTokenInput, RefreshTokenOutput, RefreshTokenUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use set_user_status::{SetUserStatusInput, SetUserStatusOutput, SetUserStatusUseCase};
pub use token::{AccessClaims, IssuedRefreshToken, RefreshClaims, TokenIssuer};
pub use verify_token::{VerifyTokenInput, VerifyTokenOutput, VerifyTokenUseCase};
