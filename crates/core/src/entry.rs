//! Price-entry vocabulary: measurement units, the entry lifecycle, admin
//! decisions, and the per-item outcome contract of the sync endpoint.
//!
//! The sync pipeline in `tokpa-api` consumes these types; keeping them here
//! keeps the outcome-mapping and quota rules unit-testable without a database.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Daily cap on entries per (agent, product, market) triple. Bounds reward
/// farming from one agent re-measuring the same stall all day.
pub const DAILY_ENTRY_LIMIT: i64 = 3;

/// Measurement unit of a price observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "unit_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Piece,
    Basket,
}

/// Lifecycle status of a ledger entry.
///
/// Entries are created `pending` and moved to exactly one of the terminal
/// states by an admin decision; they never revert and are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Validated,
    Rejected,
}

/// An administrator's decision on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "validation_decision", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValidationDecision {
    Validated,
    Rejected,
}

impl ValidationDecision {
    /// The status an entry carries after this decision is applied.
    pub fn entry_status(self) -> EntryStatus {
        match self {
            ValidationDecision::Validated => EntryStatus::Validated,
            ValidationDecision::Rejected => EntryStatus::Rejected,
        }
    }
}

/// Per-item result status reported back to the syncing client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Accepted,
    Rejected,
    Duplicate,
    LimitExceeded,
}

impl From<EntryStatus> for SyncStatus {
    /// How a stored entry reads when its idempotency key is replayed: only a
    /// terminally rejected entry reports as rejected, everything else as
    /// accepted (the client's submission did land).
    fn from(status: EntryStatus) -> Self {
        match status {
            EntryStatus::Pending | EntryStatus::Validated => SyncStatus::Accepted,
            EntryStatus::Rejected => SyncStatus::Rejected,
        }
    }
}

/// One element of the sync response array. Same order and cardinality as the
/// submitted batch; `id` is present whenever a ledger row backs the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
}

impl SyncOutcome {
    /// A fresh ledger row was created for this item.
    pub fn accepted(client_id: Option<String>, id: DbId) -> Self {
        SyncOutcome {
            client_id,
            status: SyncStatus::Accepted,
            reason: None,
            id: Some(id),
        }
    }

    /// The item's `clientId` was seen before; report the stored entry.
    pub fn replayed(client_id: Option<String>, status: EntryStatus, id: DbId) -> Self {
        SyncOutcome {
            client_id,
            status: status.into(),
            reason: Some("Already processed".to_string()),
            id: Some(id),
        }
    }

    /// The (agent, product, market) triple hit the daily cap.
    pub fn limit_exceeded(client_id: Option<String>) -> Self {
        SyncOutcome {
            client_id,
            status: SyncStatus::LimitExceeded,
            reason: Some(format!(
                "Daily limit reached ({DAILY_ENTRY_LIMIT} entries per day per agent/product/market)"
            )),
            id: None,
        }
    }

    /// A different `clientId` already recorded the same observation.
    pub fn duplicate(client_id: Option<String>) -> Self {
        SyncOutcome {
            client_id,
            status: SyncStatus::Duplicate,
            reason: Some(
                "Entry with same product/market/unit/date/price already exists".to_string(),
            ),
            id: None,
        }
    }

    /// The item failed for a reason outside the business rules.
    pub fn rejected(client_id: Option<String>, reason: String) -> Self {
        SyncOutcome {
            client_id,
            status: SyncStatus::Rejected,
            reason: Some(reason),
            id: None,
        }
    }
}

/// Start (inclusive) and end (exclusive) of the calendar day containing `now`
/// in the server's local timezone, as UTC instants for `captured_at` range
/// queries. This is the daily-quota window: local midnight to midnight.
///
/// On the rare DST transition where local midnight does not exist the bounds
/// degrade to `now` / `start + 24h`; the quota stays a soft cap either way.
pub fn local_day_bounds(now: DateTime<Local>) -> (Timestamp, Timestamp) {
    let day = now.date_naive();

    let start = Local
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
        .unwrap_or(now);

    let end = day
        .succ_opt()
        .and_then(|next| Local.from_local_datetime(&next.and_time(NaiveTime::MIN)).earliest())
        .unwrap_or(start + Duration::days(1));

    (start.with_timezone(&Utc), end.with_timezone(&Utc))
}
