//! Handlers for the `/auth` resource (OTP login, verify, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokpa_core::error::CoreError;
use tokpa_core::otp::generate_code;
use tokpa_core::roles::Role;
use tokpa_core::types::DbId;
use tokpa_db::models::agent::{Agent, CreateAgent};
use tokpa_db::models::otp::CreateOtp;
use tokpa_db::models::refresh_token::CreateRefreshToken;
use tokpa_db::repositories::{AgentRepo, OtpRepo, RefreshTokenRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Name new agents get until an admin edits them.
const DEFAULT_AGENT_NAME: &str = "New Agent";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
}

/// Response for `POST /auth/login`. The code itself travels out of band.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    /// Seconds until the issued code expires.
    pub expires_in: i64,
}

/// Request body for `POST /auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub phone: String,
    pub otp: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by verify and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub agent: AgentInfo,
}

/// Public agent info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct AgentInfo {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/login
///
/// Issue a one-time code for the phone number. Any previously issued codes
/// for the same phone stop working.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let phone = input.phone.trim();
    if phone.is_empty() {
        return Err(AppError::BadRequest("phone must not be empty".into()));
    }

    // 1. One active code per phone.
    OtpRepo::invalidate_active(&state.pool, phone).await?;

    // 2. Issue a fresh code.
    let ttl = state.config.otp_ttl_secs;
    let otp_input = CreateOtp {
        phone: phone.to_string(),
        code: generate_code(),
        expires_at: Utc::now() + chrono::Duration::seconds(ttl),
    };
    OtpRepo::create(&state.pool, &otp_input).await?;

    // 3. Hand off for delivery. No SMS gateway is wired up, so the code only
    //    reaches the debug log.
    tracing::debug!(phone = %phone, code = %otp_input.code, "OTP issued");

    Ok(Json(LoginResponse {
        message: "OTP sent",
        expires_in: ttl,
    }))
}

/// POST /auth/verify
///
/// Exchange phone + code for access/refresh tokens. The first successful
/// verification of an unknown phone registers it as a new agent.
pub async fn verify(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyRequest>,
) -> AppResult<Json<AuthResponse>> {
    let phone = input.phone.trim();

    // 1. Match an unused, unexpired code.
    let otp = OtpRepo::find_valid(&state.pool, phone, &input.otp)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid or expired OTP".into())))?;

    // 2. Burn it; codes are single-use.
    OtpRepo::mark_used(&state.pool, otp.id).await?;

    // 3. Find or auto-register the agent.
    let agent = match AgentRepo::find_by_phone(&state.pool, phone).await? {
        Some(agent) => agent,
        None => {
            let created = AgentRepo::create(
                &state.pool,
                &CreateAgent {
                    name: DEFAULT_AGENT_NAME.to_string(),
                    phone: phone.to_string(),
                    role: Role::Agent,
                },
            )
            .await?;
            tracing::info!(agent_id = %created.id, "Agent auto-registered on first login");
            created
        }
    };

    // 4. Generate tokens and persist the refresh-token hash.
    let response = create_auth_response(&state, &agent).await?;

    Ok(Json(response))
}

/// POST /auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find a matching active token.
    let stored = RefreshTokenRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke the old token (rotation).
    RefreshTokenRepo::revoke(&state.pool, stored.id).await?;

    // 4. Find the agent.
    let agent = AgentRepo::find_by_id(&state.pool, stored.agent_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Agent no longer exists".into())))?;

    // 5. Generate new tokens.
    let response = create_auth_response(&state, &agent).await?;

    Ok(Json(response))
}

/// POST /auth/logout
///
/// Revoke all refresh tokens for the authenticated agent. Returns 204.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    RefreshTokenRepo::revoke_all_for_agent(&state.pool, auth.agent_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist the refresh hash, build the response.
async fn create_auth_response(state: &AppState, agent: &Agent) -> AppResult<AuthResponse> {
    let role = agent.role.as_str();

    let access_token = generate_access_token(agent.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let token_input = CreateRefreshToken {
        agent_id: agent.id,
        token_hash: refresh_hash,
        expires_at,
    };
    RefreshTokenRepo::create(&state.pool, &token_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        agent: AgentInfo {
            id: agent.id,
            name: agent.name.clone(),
            phone: agent.phone.clone(),
            role: role.to_string(),
        },
    })
}
