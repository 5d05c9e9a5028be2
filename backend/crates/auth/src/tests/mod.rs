//! Crate-level tests
//!
//! Use cases and HTTP routes run against an in-memory store.

mod http_tests;
mod memory;
