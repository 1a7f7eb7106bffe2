//! Handlers for the `/admin/entries` review surface.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokpa_core::entry::ValidationDecision;
use tokpa_core::error::CoreError;
use tokpa_core::types::DbId;
use tokpa_db::models::price_entry::{PendingEntry, PriceEntry};
use tokpa_db::models::validation::Validation;
use tokpa_db::repositories::{EntryRepo, ValidationRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Review-queue page size when the client does not pick one.
const DEFAULT_PAGE_LIMIT: i64 = 10;
/// Hard ceiling on the review-queue page size.
const MAX_PAGE_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/entries`.
#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Pagination metadata echoed alongside each review-queue page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Response for `GET /admin/entries`.
#[derive(Debug, Serialize)]
pub struct PendingEntriesResponse {
    pub data: Vec<PendingEntry>,
    pub meta: PageMeta,
}

/// Request body for `POST /admin/entries/{id}/validate`.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: ValidationDecision,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin/entries
///
/// Page through entries awaiting review, newest first, with the product,
/// market, and agent display data the review screen shows.
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<PendingQuery>,
) -> AppResult<Json<PendingEntriesResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);
    let offset = (page - 1) * limit;

    let rows = EntryRepo::list_pending(&state.pool, limit, offset).await?;
    let total = EntryRepo::count_pending(&state.pool).await?;
    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    Ok(Json(PendingEntriesResponse {
        data: rows.into_iter().map(PendingEntry::from).collect(),
        meta: PageMeta {
            page,
            limit,
            total,
            total_pages,
        },
    }))
}

/// POST /admin/entries/{id}/validate
///
/// Apply an admin decision to an entry and append an audit row. Re-deciding
/// is allowed; each call appends to the history.
pub async fn decide(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<DecisionRequest>,
) -> AppResult<Json<PriceEntry>> {
    let reason = input.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());

    let entry = EntryRepo::apply_decision(&state.pool, id, admin.agent_id, input.decision, reason)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PriceEntry",
            id,
        }))?;

    let action = match input.decision {
        ValidationDecision::Validated => "VALIDATE",
        ValidationDecision::Rejected => "REJECT",
    };
    tracing::info!(
        action = action,
        entry_id = %entry.id,
        admin_id = %admin.agent_id,
        decision = ?input.decision,
        reason = reason.unwrap_or("-"),
        product_id = %entry.product_id,
        market_id = %entry.market_id,
        price_value = %entry.price_value,
        "Entry reviewed"
    );

    Ok(Json(entry))
}

/// GET /admin/entries/{id}/validations
///
/// Full decision history for one entry, newest first. 404 for an unknown
/// entry, an empty list for one that was never reviewed.
pub async fn history(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Validation>>> {
    EntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PriceEntry",
            id,
        }))?;

    let validations = ValidationRepo::list_for_entry(&state.pool, id).await?;
    Ok(Json(validations))
}
