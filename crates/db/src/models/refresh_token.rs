use sqlx::FromRow;
use tokpa_core::types::{DbId, Timestamp};

/// A refresh token row. Only the SHA-256 hash of the opaque token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: DbId,
    pub agent_id: DbId,
    pub token_hash: String,
    pub revoked: bool,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// Input for persisting a freshly issued refresh token.
#[derive(Debug)]
pub struct CreateRefreshToken {
    pub agent_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
