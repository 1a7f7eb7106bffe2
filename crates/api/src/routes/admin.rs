//! Route definitions for the `/admin` review surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All admin-only.
///
/// ```text
/// GET  /entries                   -> pending review queue (?page=&limit=)
/// POST /entries/{id}/validate     -> apply a decision
/// GET  /entries/{id}/validations  -> decision history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(admin::list_pending))
        .route("/entries/{id}/validate", post(admin::decide))
        .route("/entries/{id}/validations", get(admin::history))
}
