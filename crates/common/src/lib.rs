// ================
// common/src/lib.rs
// ================
//! Request and response bodies exchanged between `authgate` clients and the server.
//!
//! Request fields are optional at the wire level so that a body with a missing
//! field still parses; the server decides whether the value is acceptable.

use serde::{Deserialize, Serialize};

/// Body of `POST /register`
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /login`
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /update_profile`. Absent or empty fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Public projection of a user account. Carries no credential material.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub name: String,
    pub email: String,
}

/// Reply to a successful registration or login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// Plain `{"message": ...}` body, used for greetings and for every error
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply to a successful profile update
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: UserView,
}
