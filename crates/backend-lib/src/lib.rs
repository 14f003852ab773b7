// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library for the `authgate` registration and authentication service.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use crate::auth::{CredentialStore, HashCost, TokenService};
use crate::config::Settings;
use crate::storage::{MemoryStorage, UserStorage};

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Credential store, sole owner of user records
    pub users: CredentialStore<S>,
    /// Session token service keyed by the process secret
    pub tokens: TokenService,
    /// Settings the state was built from
    pub settings: Settings,
}

impl<S: UserStorage> AppState<S> {
    /// Create a new application state
    pub fn new(storage: S, config: &Settings) -> anyhow::Result<Self> {
        config.validate()?;
        let cost = HashCost::try_from(&config.auth.hash)?;

        Ok(Self {
            users: CredentialStore::new(storage, cost),
            tokens: TokenService::with_hs256(config.auth.secret.as_bytes()),
            settings: config.clone(),
        })
    }
}

impl AppState<MemoryStorage> {
    /// Create a new application state backed by a fresh in-memory store
    pub fn in_memory(config: &Settings) -> anyhow::Result<Self> {
        Self::new(MemoryStorage::new(), config)
    }
}
