//! Repository for the `price_entries` table.

use sqlx::PgPool;
use tokpa_core::entry::ValidationDecision;
use tokpa_core::types::{DbId, Timestamp};

use crate::models::price_entry::{CreatePriceEntry, PendingEntryRow, PriceEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, agent_id, product_id, market_id, unit, price_value, \
    currency, photo_url, lat, lon, captured_at, status, created_at, updated_at";

/// Entry columns qualified with the display columns used by the review queue.
const REVIEW_COLUMNS: &str = "e.id, e.client_id, e.agent_id, e.product_id, e.market_id, e.unit, \
    e.price_value, e.currency, e.photo_url, e.lat, e.lon, e.captured_at, e.status, e.created_at, \
    e.updated_at, \
    p.name AS product_name, p.category AS product_category, \
    m.name AS market_name, m.city AS market_city, \
    a.name AS agent_name, a.phone AS agent_phone";

/// Provides persistence for price observations and their review decisions.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new observation with status `pending`, returning the row.
    ///
    /// Unique violations on `uq_price_entries_observation` and
    /// `uq_price_entries_client_id` surface as `sqlx::Error::Database`; the
    /// sync pipeline inspects the constraint name to pick the outcome.
    pub async fn insert(pool: &PgPool, input: &CreatePriceEntry) -> Result<PriceEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO price_entries \
                (client_id, agent_id, product_id, market_id, unit, price_value, \
                 currency, photo_url, lat, lon, captured_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PriceEntry>(&query)
            .bind(&input.client_id)
            .bind(input.agent_id)
            .bind(input.product_id)
            .bind(input.market_id)
            .bind(input.unit)
            .bind(input.price_value)
            .bind(&input.currency)
            .bind(&input.photo_url)
            .bind(input.lat)
            .bind(input.lon)
            .bind(input.captured_at)
            .fetch_one(pool)
            .await
    }

    /// Find an observation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PriceEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM price_entries WHERE id = $1");
        sqlx::query_as::<_, PriceEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an observation by the client-chosen idempotency key.
    pub async fn find_by_client_id(
        pool: &PgPool,
        client_id: &str,
    ) -> Result<Option<PriceEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM price_entries WHERE client_id = $1");
        sqlx::query_as::<_, PriceEntry>(&query)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// Count observations for one (agent, product, market) triple captured
    /// within `[start, end)`.
    ///
    /// Backs the daily quota check. No lock is held between this count and
    /// the subsequent insert, so the quota is a soft cap under concurrency.
    pub async fn count_for_window(
        pool: &PgPool,
        agent_id: DbId,
        product_id: DbId,
        market_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM price_entries \
             WHERE agent_id = $1 AND product_id = $2 AND market_id = $3 \
               AND captured_at >= $4 AND captured_at < $5",
        )
        .bind(agent_id)
        .bind(product_id)
        .bind(market_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }

    /// One page of the review queue: pending entries, newest first, joined
    /// with product / market / agent display columns.
    pub async fn list_pending(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PendingEntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} \
             FROM price_entries e \
             JOIN products p ON p.id = e.product_id \
             JOIN markets m ON m.id = e.market_id \
             JOIN agents a ON a.id = e.agent_id \
             WHERE e.status = 'pending' \
             ORDER BY e.created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, PendingEntryRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of pending entries (pagination metadata).
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM price_entries WHERE status = 'pending'",
        )
        .fetch_one(pool)
        .await
    }

    /// Apply an admin decision: flip the entry status and append the audit
    /// row in one transaction. Returns `None` if the entry does not exist.
    ///
    /// Re-deciding an already reviewed entry is allowed and appends another
    /// audit row.
    pub async fn apply_decision(
        pool: &PgPool,
        entry_id: DbId,
        admin_id: DbId,
        decision: ValidationDecision,
        reason: Option<&str>,
    ) -> Result<Option<PriceEntry>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE price_entries SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, PriceEntry>(&update_query)
            .bind(entry_id)
            .bind(decision.entry_status())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(entry) = entry else {
            // Nothing updated; dropping the transaction rolls it back.
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO validations (price_entry_id, admin_id, decision, reason) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(entry_id)
        .bind(admin_id)
        .bind(decision)
        .bind(reason)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(entry))
    }
}
