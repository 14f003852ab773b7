// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs carrying the account email and an absolute expiry.
//! Nothing is stored server-side: a token is valid when its signature checks
//! out under the process secret and its expiry has not passed.
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token time-to-live
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity
    pub email: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Issued at timestamp (Unix seconds). Optional on the wire.
    #[serde(default)]
    pub iat: i64,
}

/// Outcomes of a failed issue or verify
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    /// Bad signature, unparseable structure or missing claims
    #[error("malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens with a shared HMAC secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a service signing with HS256 over `secret`
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the caller's clock
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `email` valid for [`TOKEN_TTL`] from now
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            email: email.to_string(),
            exp: iat + TOKEN_TTL.as_secs() as i64,
            iat,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify a token and return the email it was issued for
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the instant `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Malformed)?;

        if now.timestamp_millis() > data.claims.exp.saturating_mul(1000) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.email)
    }
}
