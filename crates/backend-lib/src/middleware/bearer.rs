use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use metrics::counter;

use crate::storage::UserStorage;
use crate::{error::AppError, AppState};

/// Identity proven by a verified session token, inserted into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// Bearer token middleware
///
/// Rejects the request with 401 unless the `Authorization` header carries a
/// token that verifies. On success the handler can extract
/// `Extension<Identity>`.
pub async fn require_token<S: UserStorage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = {
        let token = extract_token(request.headers())?;
        state.tokens.verify(token).map_err(|e| {
            counter!(crate::metrics::TOKEN_REJECTED).increment(1);
            AppError::from(e)
        })?
    };

    request.extensions_mut().insert(Identity { email });

    Ok(next.run(request).await)
}

const BEARER: &str = "Bearer";

/// Pull the token out of the `Authorization` header.
///
/// Accepts either the bare token or `Bearer <token>`. The scheme is matched
/// case-insensitively.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(AppError::MissingToken);
    };
    let value = value.to_str().map_err(|_| AppError::MalformedToken)?.trim();
    let token = match value.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => {
            let rest = &value[BEARER.len()..];
            if rest.is_empty() || rest.starts_with(' ') {
                rest.trim()
            } else {
                value
            }
        },
        _ => value,
    };

    if token.is_empty() {
        return Err(AppError::MissingToken);
    }
    Ok(token)
}
