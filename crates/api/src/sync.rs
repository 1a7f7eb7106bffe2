//! Offline-sync ingestion pipeline.
//!
//! A batch of mobile submissions is processed strictly in order, one item at
//! a time, and every item gets exactly one [`SyncOutcome`]. An item can fail
//! without aborting its siblings; only malformed input (checked before the
//! pipeline runs) rejects the whole batch.
//!
//! Per item the pipeline is a cascade:
//!
//! 1. `clientId` already stored -- replay the stored entry's outcome.
//! 2. Daily quota for the (agent, product, market) triple reached -- refuse.
//! 3. Insert as `pending`; constraint violations map to `duplicate`,
//!    replay (idempotency race) or a `rejected` outcome.

use chrono::Local;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokpa_core::entry::{local_day_bounds, SyncOutcome, Unit, DAILY_ENTRY_LIMIT};
use tokpa_core::types::{DbId, Timestamp};
use tokpa_core::validate;
use tokpa_db::models::price_entry::CreatePriceEntry;
use tokpa_db::repositories::EntryRepo;
use tokpa_db::DbPool;

use crate::error::AppError;

/// Postgres error codes the pipeline dispatches on.
const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Constraint names declared in the `price_entries` migration.
const CONSTRAINT_CLIENT_ID: &str = "uq_price_entries_client_id";
const CONSTRAINT_OBSERVATION: &str = "uq_price_entries_observation";

/// One item of a sync batch as submitted by the mobile client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySubmission {
    /// Client-generated idempotency key, unique per captured observation.
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
    /// When the observation was made in the field (device clock).
    pub captured_at: Timestamp,
}

impl EntrySubmission {
    fn to_create(&self) -> CreatePriceEntry {
        CreatePriceEntry {
            client_id: self.client_id.clone(),
            agent_id: self.agent_id,
            product_id: self.product_id,
            market_id: self.market_id,
            unit: self.unit,
            price_value: self.price_value,
            currency: self.currency.clone(),
            photo_url: self.photo_url.clone(),
            lat: self.lat,
            lon: self.lon,
            captured_at: self.captured_at,
        }
    }
}

/// Check shape and ranges of every item before the pipeline runs.
///
/// The whole batch fails on the first bad item: a malformed item is a client
/// bug, not a business outcome, so nothing is partially ingested.
pub fn validate_batch(items: &[EntrySubmission]) -> Result<(), AppError> {
    for (index, item) in items.iter().enumerate() {
        validate_item(item)
            .map_err(|msg| AppError::BadRequest(format!("entries[{index}]: {msg}")))?;
    }
    Ok(())
}

fn validate_item(item: &EntrySubmission) -> Result<(), String> {
    validate::validate_client_id(item.client_id.as_deref())?;
    validate::validate_price(item.price_value)?;
    validate::validate_currency(&item.currency)?;
    validate::validate_latitude(item.lat)?;
    validate::validate_longitude(item.lon)?;
    Ok(())
}

/// Run the pipeline over a batch, returning one outcome per item in order.
///
/// Infrastructure failures on one item surface as its `rejected` outcome and
/// the remaining items still run.
pub async fn process_batch(
    pool: &DbPool,
    submitted_by: DbId,
    items: Vec<EntrySubmission>,
) -> Vec<SyncOutcome> {
    let mut outcomes = Vec::with_capacity(items.len());

    for item in &items {
        let outcome = process_item(pool, item).await;
        tracing::debug!(
            submitted_by = %submitted_by,
            client_id = item.client_id.as_deref().unwrap_or("-"),
            agent_id = %item.agent_id,
            product_id = %item.product_id,
            market_id = %item.market_id,
            status = ?outcome.status,
            "Sync item processed"
        );
        outcomes.push(outcome);
    }

    tracing::info!(
        submitted_by = %submitted_by,
        batch_size = items.len(),
        accepted = outcomes.iter().filter(|o| o.id.is_some()).count(),
        "Sync batch processed"
    );

    outcomes
}

async fn process_item(pool: &DbPool, item: &EntrySubmission) -> SyncOutcome {
    // Step 1: idempotency replay.
    if let Some(client_id) = item.client_id.as_deref() {
        match EntryRepo::find_by_client_id(pool, client_id).await {
            Ok(Some(existing)) => {
                return SyncOutcome::replayed(item.client_id.clone(), existing.status, existing.id)
            }
            Ok(None) => {}
            Err(err) => return reject_with_error(item, &err),
        }
    }

    // Step 2: daily quota, counted over the server's local calendar day.
    let (day_start, day_end) = local_day_bounds(Local::now());
    match EntryRepo::count_for_window(
        pool,
        item.agent_id,
        item.product_id,
        item.market_id,
        day_start,
        day_end,
    )
    .await
    {
        Ok(count) if count >= DAILY_ENTRY_LIMIT => {
            return SyncOutcome::limit_exceeded(item.client_id.clone())
        }
        Ok(_) => {}
        Err(err) => return reject_with_error(item, &err),
    }

    // Step 3: insert as pending.
    match EntryRepo::insert(pool, &item.to_create()).await {
        Ok(entry) => SyncOutcome::accepted(item.client_id.clone(), entry.id),
        Err(err) => classify_insert_error(pool, item, err).await,
    }
}

/// Map an insert failure to the item's outcome.
///
/// Constraint violations are expected traffic, not errors: the observation
/// uniqueness constraint means a content duplicate, and losing an idempotency
/// race means another request already stored this `clientId`.
async fn classify_insert_error(
    pool: &DbPool,
    item: &EntrySubmission,
    err: sqlx::Error,
) -> SyncOutcome {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.code().as_deref() {
            Some(PG_UNIQUE_VIOLATION) => match db_err.constraint() {
                Some(CONSTRAINT_OBSERVATION) => {
                    return SyncOutcome::duplicate(item.client_id.clone());
                }
                Some(CONSTRAINT_CLIENT_ID) => {
                    // Lost a concurrent race on the same idempotency key; the
                    // winner's row carries this item's outcome.
                    if let Some(client_id) = item.client_id.as_deref() {
                        if let Ok(Some(existing)) = EntryRepo::find_by_client_id(pool, client_id).await
                        {
                            return SyncOutcome::replayed(
                                item.client_id.clone(),
                                existing.status,
                                existing.id,
                            );
                        }
                    }
                }
                _ => {}
            },
            Some(PG_FOREIGN_KEY_VIOLATION) => {
                let reference = match db_err.constraint() {
                    Some(c) if c.contains("agent") => "agent",
                    Some(c) if c.contains("product") => "product",
                    Some(c) if c.contains("market") => "market",
                    _ => "foreign key",
                };
                return SyncOutcome::rejected(
                    item.client_id.clone(),
                    format!("Unknown {reference} reference"),
                );
            }
            _ => {}
        }
    }
    reject_with_error(item, &err)
}

fn reject_with_error(item: &EntrySubmission, err: &sqlx::Error) -> SyncOutcome {
    tracing::error!(
        client_id = item.client_id.as_deref().unwrap_or("-"),
        agent_id = %item.agent_id,
        error = %err,
        "Sync item failed"
    );
    SyncOutcome::rejected(item.client_id.clone(), err.to_string())
}
