//! Platform Crate - Technical Infrastructure
//!
//! Domain-free building blocks shared by the service crates:
//! - Password hashing (bcrypt) and the password composition policy
//! - HS256 JWT signing and verification
//! - Bearer credential extraction from HTTP headers

pub mod bearer;
pub mod jwt;
pub mod password;
