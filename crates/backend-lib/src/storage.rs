// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! User record storage keyed by email.
//!
//! Every mutation runs under a single write lock over the whole key space, so a
//! rename (insert new key, drop old key) is one step from a reader's point of view.
use std::collections::HashMap;
use std::fmt;

use authgate_common::UserView;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::AppError;

/// Conflict message when registering an email that is already stored
pub const USER_EXISTS: &str = "User already exists";

/// Conflict message when renaming onto an email owned by another record
pub const EMAIL_TAKEN: &str = "Email already exists!";

/// One registered account
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

impl UserRecord {
    /// Build a fresh record with a new id. `password_hash` must already be hashed.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash,
        }
    }

    /// Stable identity, unchanged by email renames
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// PHC-format hash string
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// The client-facing projection
    pub fn view(&self) -> UserView {
        UserView {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Fields to change on an existing record. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Trait for user storage backends
pub trait UserStorage: Send + Sync {
    /// Look up a record by its email key
    fn get(&self, email: &str) -> Option<UserRecord>;

    /// Insert a record whose email is not yet present.
    /// Fails with [`AppError::Conflict`] if the key exists.
    fn insert_new(&self, record: UserRecord) -> Result<UserRecord, AppError>;

    /// Apply `update` to the record stored under `current_email`, moving it to
    /// the new key when the email changes. Nothing is mutated on error.
    fn update(&self, current_email: &str, update: ProfileUpdate) -> Result<UserRecord, AppError>;

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime in-memory implementation of [`UserStorage`]
#[derive(Default)]
pub struct MemoryStorage {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStorage for MemoryStorage {
    fn get(&self, email: &str) -> Option<UserRecord> {
        self.users.read().get(email).cloned()
    }

    fn insert_new(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let mut users = self.users.write();
        if users.contains_key(&record.email) {
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, current_email: &str, update: ProfileUpdate) -> Result<UserRecord, AppError> {
        let mut users = self.users.write();
        let current = users.get(current_email).cloned().ok_or(AppError::NotFound)?;

        // Validate everything before touching the map
        let new_email = update.email.filter(|email| email != current_email);
        if let Some(email) = new_email.as_deref() {
            if users.get(email).is_some_and(|other| other.id != current.id) {
                return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
            }
        }

        let mut updated = current;
        if let Some(name) = update.name {
            updated.name = name;
        }

        match new_email {
            Some(email) => {
                updated.email = email.clone();
                users.insert(email, updated.clone());
                users.remove(current_email);
            },
            None => {
                users.insert(current_email.to_string(), updated.clone());
            },
        }

        Ok(updated)
    }

    fn len(&self) -> usize {
        self.users.read().len()
    }
}
