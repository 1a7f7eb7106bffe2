//! Route definitions for the `/agents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::agents;
use crate::state::AppState;

/// Routes mounted at `/agents`. All admin-only.
///
/// ```text
/// GET  /  -> list agents
/// POST /  -> register an agent
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(agents::list).post(agents::create))
}
