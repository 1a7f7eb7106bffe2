//! Route definitions for the `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET  /  -> list products (public)
/// POST /  -> create product (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(products::list).post(products::create))
}
