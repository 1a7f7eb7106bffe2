use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use tokpa_core::entry::{EntryStatus, Unit};
use tokpa_core::types::{DbId, Timestamp};

/// A price observation row.
///
/// `captured_day` is a stored generated column used only by the
/// observation uniqueness constraint, so it is not mapped here.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub id: DbId,
    pub client_id: Option<String>,
    pub agent_id: DbId,
    pub product_id: DbId,
    pub market_id: DbId,
    pub unit: Unit,
    pub price_value: Decimal,
    pub currency: String,
    pub photo_url: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub captured_at: Timestamp,
    pub status: EntryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for inserting a price observation. Status always starts `pending`.
#[derive(Debug)]
pub struct CreatePriceEntry {
    pub client_id: Option<String>,
    pub agent_id: DbId,
    pub product_id: DbId,
    pub market_id: DbId,
    pub unit: Unit,
    pub price_value: Decimal,
    pub currency: String,
    pub photo_url: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub captured_at: Timestamp,
}

/// Flat join row behind the admin review queue: entry columns plus aliased
/// display columns from the three referenced tables.
#[derive(Debug, Clone, FromRow)]
pub struct PendingEntryRow {
    pub id: DbId,
    pub client_id: Option<String>,
    pub agent_id: DbId,
    pub product_id: DbId,
    pub market_id: DbId,
    pub unit: Unit,
    pub price_value: Decimal,
    pub currency: String,
    pub photo_url: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub captured_at: Timestamp,
    pub status: EntryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub product_name: String,
    pub product_category: Option<String>,
    pub market_name: String,
    pub market_city: String,
    pub agent_name: String,
    pub agent_phone: String,
}

/// Product display fields on a review queue item.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
}

/// Market display fields on a review queue item.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub id: DbId,
    pub name: String,
    pub city: String,
}

/// Agent display fields on a review queue item.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSummary {
    pub id: DbId,
    pub name: String,
    pub phone: String,
}

/// A review queue item: the entry with the display data admins see.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEntry {
    #[serde(flatten)]
    pub entry: PriceEntry,
    pub product: ProductSummary,
    pub market: MarketSummary,
    pub agent: AgentSummary,
}

impl From<PendingEntryRow> for PendingEntry {
    fn from(row: PendingEntryRow) -> Self {
        Self {
            product: ProductSummary {
                id: row.product_id,
                name: row.product_name,
                category: row.product_category,
            },
            market: MarketSummary {
                id: row.market_id,
                name: row.market_name,
                city: row.market_city,
            },
            agent: AgentSummary {
                id: row.agent_id,
                name: row.agent_name,
                phone: row.agent_phone,
            },
            entry: PriceEntry {
                id: row.id,
                client_id: row.client_id,
                agent_id: row.agent_id,
                product_id: row.product_id,
                market_id: row.market_id,
                unit: row.unit,
                price_value: row.price_value,
                currency: row.currency,
                photo_url: row.photo_url,
                lat: row.lat,
                lon: row.lon,
                captured_at: row.captured_at,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
