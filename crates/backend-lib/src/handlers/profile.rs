// ============================
// crates/backend-lib/src/handlers/profile.rs
// ============================
//! Profile view and update for the token holder.
use std::sync::Arc;

use authgate_common::{UpdateProfileRequest, UpdateProfileResponse, UserView};
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::middleware::Identity;
use crate::storage::UserStorage;
use crate::{error::AppError, AppState};

/// `POST /profile`
pub async fn profile<S: UserStorage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserView>, AppError> {
    let user = state.users.get_by_email(&identity.email)?;
    Ok(Json(user.view()))
}

/// `POST /update_profile`
///
/// A token minted before an email change still names the old email, so it
/// stops resolving to this account once the rename succeeds. The account is
/// resolved before the body is looked at.
pub async fn update_profile<S: UserStorage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    state.users.get_by_email(&identity.email)?;
    let Json(req) = payload?;

    let user = state
        .users
        .update_profile(&identity.email, req.name, req.email)?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: user.view(),
    }))
}
