// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use authgate_common::MessageResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::TokenError;
use crate::validation::ValidationError;

/// Application error types with error codes and client-facing messages
#[derive(Error, Debug)]
pub enum AppError {
    /// Required input missing or empty
    #[error("{0}")]
    Validation(String),

    /// Request body was not the JSON shape the endpoint expects
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Uniqueness violation on the email key
    #[error("{0}")]
    Conflict(String),

    #[error("User not found!")]
    NotFound,

    #[error("Invalid password!")]
    InvalidCredentials,

    #[error("Token is missing!")]
    MissingToken,

    #[error("Token has expired!")]
    ExpiredToken,

    #[error("Invalid token!")]
    MalformedToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            },
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials
            | AppError::MissingToken
            | AppError::ExpiredToken
            | AppError::MalformedToken => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidBody(_) => "VAL_002",
            AppError::Conflict(_) => "CONFLICT_001",
            AppError::NotFound => "NF_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::MissingToken => "AUTH_002",
            AppError::ExpiredToken => "AUTH_003",
            AppError::MalformedToken => "AUTH_004",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message placed in the `{"message"}` body. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidBody(_) => "Invalid request body".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        (status, Json(MessageResponse::new(self.client_message()))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::ExpiredToken,
            TokenError::Malformed(source) => {
                tracing::debug!(error = %source, "token failed verification");
                AppError::MalformedToken
            },
            TokenError::Signing(source) => AppError::Internal(source.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {err}"))
    }
}
