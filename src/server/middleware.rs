//! Request middleware

use super::state::AppState;
use crate::core::auth::AuthContext;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Resolve the caller through the configured [`AuthProvider`]
///
/// On success the [`AuthContext`] is stored in the request extensions; on
/// failure the request is answered with 401 and never reaches a handler.
///
/// [`AuthProvider`]: crate::core::auth::AuthProvider
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match state.auth.extract_context(request.headers()).await {
        Ok(context) => {
            request.extensions_mut().insert::<AuthContext>(context);
            next.run(request).await
        }
        Err(err) => {
            warn!(path = %request.uri().path(), "rejected unauthenticated request");
            err.into_response()
        }
    }
}
