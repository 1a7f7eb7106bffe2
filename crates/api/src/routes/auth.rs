//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login    -> request an OTP (public)
/// POST /verify   -> exchange OTP for tokens (public)
/// POST /refresh  -> rotate tokens (public)
/// POST /logout   -> revoke refresh tokens (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/verify", post(auth::verify))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
