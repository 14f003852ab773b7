// ============================
// crates/backend-lib/src/handlers/account.rs
// ============================
//! Registration, login and the protected greeting.
use std::sync::Arc;

use authgate_common::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use metrics::counter;

use crate::middleware::Identity;
use crate::storage::UserStorage;
use crate::{error::AppError, AppState};

/// `POST /register`
pub async fn register<S: UserStorage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let Json(req) = payload?;

    let user = state
        .users
        .register(field(&req.name), field(&req.email), field(&req.password))
        .await?;
    let token = state.tokens.issue(user.email())?;
    counter!(crate::metrics::TOKEN_ISSUED).increment(1);

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            message: "User registered successfully".to_string(),
            token,
        }),
    ))
}

/// `POST /login`
pub async fn login<S: UserStorage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = payload?;

    let user = state
        .users
        .authenticate(field(&req.email), field(&req.password))
        .await?;
    let token = state.tokens.issue(user.email())?;
    counter!(crate::metrics::TOKEN_ISSUED).increment(1);

    Ok(Json(TokenResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// `POST /protected`
pub async fn protected(Extension(identity): Extension<Identity>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Welcome {}! This is a protected route.",
        identity.email
    )))
}

/// Absent and empty fields are treated alike
fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
