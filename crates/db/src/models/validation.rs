use serde::Serialize;
use sqlx::FromRow;
use tokpa_core::entry::ValidationDecision;
use tokpa_core::types::{DbId, Timestamp};

/// An audit row recording a single admin review decision.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub id: DbId,
    pub price_entry_id: DbId,
    pub admin_id: DbId,
    pub decision: ValidationDecision,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}
