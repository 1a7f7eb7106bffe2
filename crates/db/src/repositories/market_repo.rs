//! Repository for the `markets` table.

use sqlx::PgPool;

use crate::models::market::{CreateMarket, Market};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, city, lat, lon, created_at, updated_at";

/// Provides CRUD operations for markets.
pub struct MarketRepo;

impl MarketRepo {
    /// Insert a new market, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMarket) -> Result<Market, sqlx::Error> {
        let query = format!(
            "INSERT INTO markets (name, city, lat, lon) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Market>(&query)
            .bind(&input.name)
            .bind(&input.city)
            .bind(input.lat)
            .bind(input.lon)
            .fetch_one(pool)
            .await
    }

    /// List all markets ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Market>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM markets ORDER BY name");
        sqlx::query_as::<_, Market>(&query).fetch_all(pool).await
    }
}
