// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `authgate` HTTP server.

pub mod bearer;

pub use bearer::{extract_token, require_token, Identity};
