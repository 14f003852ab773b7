// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{middleware, routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{login, profile, protected, register, update_profile};
use crate::middleware::require_token;
use crate::storage::UserStorage;
use crate::AppState;

/// Create the application router.
///
/// `/register` and `/login` are public; every other route sits behind
/// [`require_token`].
pub fn create_router<S: UserStorage + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let authenticated = Router::new()
        .route("/protected", post(protected))
        .route("/profile", post(profile::<S>))
        .route("/update_profile", post(update_profile::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_token::<S>,
        ));

    Router::new()
        .route("/register", post(register::<S>))
        .route("/login", post(login::<S>))
        .merge(authenticated)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
