//! Handlers for the `/agents` resource. Admin-only: agents are normally
//! auto-registered on first OTP verification, this is the back-office path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tokpa_core::roles::Role;
use tokpa_db::models::agent::{Agent, CreateAgent};
use tokpa_db::repositories::AgentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /agents`.
#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub phone: String,
    /// Defaults to `AGENT` when omitted.
    pub role: Option<Role>,
}

/// POST /agents
///
/// Register an agent up front. A duplicate phone number maps to 409 through
/// the `uq_agents_phone` constraint.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<CreateAgentRequest>,
) -> AppResult<(StatusCode, Json<Agent>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    let phone = input.phone.trim();
    if phone.is_empty() {
        return Err(AppError::BadRequest("phone must not be empty".into()));
    }

    let agent = AgentRepo::create(
        &state.pool,
        &CreateAgent {
            name: name.to_string(),
            phone: phone.to_string(),
            role: input.role.unwrap_or(Role::Agent),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(agent)))
}

/// GET /agents
///
/// List all agents, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Agent>>> {
    let agents = AgentRepo::list(&state.pool).await?;
    Ok(Json(agents))
}
