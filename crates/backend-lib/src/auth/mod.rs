// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod credentials;
pub mod password;
pub mod token;

pub use credentials::CredentialStore;
pub use password::{hash_password, verify_password, HashCost};
pub use token::{Claims, TokenError, TokenService, TOKEN_TTL};
