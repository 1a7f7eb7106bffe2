//! Route definitions for the `/sync` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// POST /entries  -> ingest a batch of offline observations (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/entries", post(sync::sync_entries))
}
