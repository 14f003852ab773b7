// ============================
// crates/backend-lib/src/auth/credentials.rs
// ============================
//! Credential store: registration, login and profile updates over a [`UserStorage`].
//!
//! Hashing and verification run on the blocking pool. The storage lock is only
//! taken for the map operations themselves, never while hashing.
use metrics::counter;
use tracing::{info, instrument, warn};
use zeroize::Zeroizing;

use super::password::{hash_password, verify_password, HashCost};
use crate::error::AppError;
use crate::storage::{ProfileUpdate, UserRecord, UserStorage, USER_EXISTS};
use crate::validation::{provided, validate_credentials, validate_registration};

/// Owns every user record and the hashing policy applied to their passwords
pub struct CredentialStore<S> {
    storage: S,
    cost: HashCost,
}

impl<S: UserStorage> CredentialStore<S> {
    pub fn new(storage: S, cost: HashCost) -> Self {
        Self { storage, cost }
    }

    /// Read-only access to the backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a new account. Fails with a conflict if `email` is taken.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AppError> {
        validate_registration(name, email, password)?;

        // Cheap pre-check so duplicates don't pay for a hash; `insert_new` re-checks
        if self.storage.get(email).is_some() {
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }

        let plain = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain, cost))
            .await?
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let record = self
            .storage
            .insert_new(UserRecord::new(name, email, password_hash))?;

        counter!(crate::metrics::USER_REGISTERED).increment(1);
        info!(user_id = %record.id(), "user registered");
        Ok(record)
    }

    /// Check `password` against the stored hash for `email`
    #[instrument(skip_all, fields(email = %email))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserRecord, AppError> {
        validate_credentials(email, password)?;

        let record = self.storage.get(email).ok_or_else(|| {
            counter!(crate::metrics::LOGIN_FAILED).increment(1);
            AppError::NotFound
        })?;

        let plain = Zeroizing::new(password.to_owned());
        let hash = record.password_hash().to_owned();
        let matches = tokio::task::spawn_blocking(move || verify_password(&hash, &plain)).await?;

        if !matches {
            counter!(crate::metrics::LOGIN_FAILED).increment(1);
            warn!(user_id = %record.id(), "password verification failed");
            return Err(AppError::InvalidCredentials);
        }

        counter!(crate::metrics::LOGIN_SUCCEEDED).increment(1);
        info!(user_id = %record.id(), "user authenticated");
        Ok(record)
    }

    pub fn get_by_email(&self, email: &str) -> Result<UserRecord, AppError> {
        self.storage.get(email).ok_or(AppError::NotFound)
    }

    /// Change the name and/or email of the account stored under `current_email`.
    /// Empty strings count as "not provided".
    #[instrument(skip_all, fields(email = %current_email))]
    pub fn update_profile(
        &self,
        current_email: &str,
        new_name: Option<String>,
        new_email: Option<String>,
    ) -> Result<UserRecord, AppError> {
        let update = ProfileUpdate {
            name: provided(new_name),
            email: provided(new_email),
        };
        let renamed = update.email.as_deref().is_some_and(|e| e != current_email);

        let record = self.storage.update(current_email, update)?;

        counter!(crate::metrics::PROFILE_UPDATED).increment(1);
        if renamed {
            info!(user_id = %record.id(), new_email = %record.email(), "account email changed");
        } else {
            info!(user_id = %record.id(), "profile updated");
        }
        Ok(record)
    }
}
