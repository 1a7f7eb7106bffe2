//! Handler for the `/sync/entries` endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tokpa_core::entry::SyncOutcome;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;
use crate::sync::{self, EntrySubmission};

/// POST /sync/entries
///
/// Ingest a batch of offline-captured price observations. The whole batch is
/// shape-checked first (one bad item fails the request with 400), then each
/// item runs through the pipeline and gets its own outcome. Replies 201 with
/// one outcome per item, in submission order.
pub async fn sync_entries(
    State(state): State<AppState>,
    RequireAuth(agent): RequireAuth,
    AppJson(items): AppJson<Vec<EntrySubmission>>,
) -> AppResult<(StatusCode, Json<Vec<SyncOutcome>>)> {
    sync::validate_batch(&items)?;

    let outcomes = sync::process_batch(&state.pool, agent.agent_id, items).await;

    Ok((StatusCode::CREATED, Json(outcomes)))
}
