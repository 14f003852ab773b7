// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use crate::config::HashSettings;

/// Tunable scrypt cost. Hashes record their own parameters, so raising the cost
/// does not invalidate existing hashes.
#[derive(Debug, Clone, Copy)]
pub struct HashCost {
    params: Params,
}

impl HashCost {
    /// Build a cost from scrypt's `log_n`, `r` and `p` parameters
    pub fn new(log_n: u8, r: u32, p: u32) -> anyhow::Result<Self> {
        let params = Params::new(log_n, r, p, Params::RECOMMENDED_LEN)
            .map_err(|e| anyhow::anyhow!("invalid scrypt parameters: {e}"))?;
        Ok(Self { params })
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl TryFrom<&HashSettings> for HashCost {
    type Error = anyhow::Error;

    fn try_from(settings: &HashSettings) -> Result<Self, Self::Error> {
        Self::new(settings.log_n, settings.r, settings.p)
    }
}

/// Hash a password using scrypt with a fresh random salt
pub fn hash_password(plain: &str, cost: HashCost) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, cost.params, &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
