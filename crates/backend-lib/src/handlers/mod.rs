// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers. Each one parses its body, calls into the credential store or
//! token service, and returns either a JSON body or an [`AppError`](crate::error::AppError).

pub mod account;
pub mod profile;

pub use account::{login, protected, register};
pub use profile::{profile, update_profile};
