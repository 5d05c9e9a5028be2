//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{
    session::{Session, SessionState},
    user::User,
};
pub use repository::{SessionRepository, UserRepository};
