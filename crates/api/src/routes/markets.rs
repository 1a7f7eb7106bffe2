//! Route definitions for the `/markets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::markets;
use crate::state::AppState;

/// Routes mounted at `/markets`.
///
/// ```text
/// GET  /  -> list markets (public)
/// POST /  -> create market (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(markets::list).post(markets::create))
}
