pub mod admin;
pub mod agents;
pub mod auth;
pub mod health;
pub mod markets;
pub mod products;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (mounted at the root, no version prefix;
/// the deployed mobile clients hardcode these paths).
///
/// Route hierarchy:
///
/// ```text
/// /health                         service + database health (public)
///
/// /auth/login                     request an OTP (public)
/// /auth/verify                    exchange OTP for tokens (public)
/// /auth/refresh                   rotate tokens (public)
/// /auth/logout                    revoke refresh tokens (requires auth)
///
/// /sync/entries                   batch ingestion (requires auth)
///
/// /admin/entries                  pending review queue (admin only)
/// /admin/entries/{id}/validate    apply a decision (admin only)
/// /admin/entries/{id}/validations decision history (admin only)
///
/// /products                       list (public), create (requires auth)
/// /markets                        list (public), create (requires auth)
/// /agents                         list, register (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (OTP login, verify, refresh, logout).
        .nest("/auth", auth::router())
        // Offline batch ingestion.
        .nest("/sync", sync::router())
        // Admin review queue and decisions.
        .nest("/admin", admin::router())
        // Reference data.
        .nest("/products", products::router())
        .nest("/markets", markets::router())
        .nest("/agents", agents::router())
}
