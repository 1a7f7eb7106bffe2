use serde::Serialize;
use sqlx::FromRow;
use tokpa_core::types::{DbId, Timestamp};

/// A product row. `units_allowed` lists the units an agent may submit
/// prices in for this product.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub units_allowed: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a product.
#[derive(Debug)]
pub struct CreateProduct {
    pub name: String,
    pub category: Option<String>,
    pub units_allowed: Vec<String>,
}
