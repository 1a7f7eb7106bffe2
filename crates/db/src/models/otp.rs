use sqlx::FromRow;
use tokpa_core::types::{DbId, Timestamp};

/// A one-time login code. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct Otp {
    pub id: DbId,
    pub phone: String,
    pub code: String,
    pub used: bool,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// Input for creating a one-time code.
#[derive(Debug)]
pub struct CreateOtp {
    pub phone: String,
    pub code: String,
    pub expires_at: Timestamp,
}
