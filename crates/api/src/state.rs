use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state passed to every handler via `State<AppState>`.
///
/// Cloning is cheap: the pool is reference-counted internally and the config
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Postgres connection pool.
    pub pool: tokpa_db::DbPool,
    /// Server configuration loaded at startup.
    pub config: Arc<ServerConfig>,
}
