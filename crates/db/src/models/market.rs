use serde::Serialize;
use sqlx::FromRow;
use tokpa_core::types::{DbId, Timestamp};

/// A market row with its coordinate pair.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a market.
#[derive(Debug)]
pub struct CreateMarket {
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}
