use serde::Serialize;
use sqlx::FromRow;
use tokpa_core::roles::Role;
use tokpa_core::types::{DbId, Timestamp};

/// An agent row. Phone doubles as the login identity.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating an agent.
#[derive(Debug)]
pub struct CreateAgent {
    pub name: String,
    pub phone: String,
    pub role: Role,
}
