//! Handlers for the `/markets` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tokpa_core::validate::{validate_latitude, validate_longitude};
use tokpa_db::models::market::{CreateMarket, Market};
use tokpa_db::repositories::MarketRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Request body for `POST /markets`.
#[derive(Debug, Deserialize)]
pub struct CreateMarketRequest {
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

/// POST /markets
///
/// Create a market. Any authenticated agent may add reference data.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_agent): RequireAuth,
    AppJson(input): AppJson<CreateMarketRequest>,
) -> AppResult<(StatusCode, Json<Market>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    let city = input.city.trim();
    if city.is_empty() {
        return Err(AppError::BadRequest("city must not be empty".into()));
    }
    validate_latitude(input.lat).map_err(AppError::BadRequest)?;
    validate_longitude(input.lon).map_err(AppError::BadRequest)?;

    let market = MarketRepo::create(
        &state.pool,
        &CreateMarket {
            name: name.to_string(),
            city: city.to_string(),
            lat: input.lat,
            lon: input.lon,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(market)))
}

/// GET /markets
///
/// List all markets, ordered by name. Public, same as products.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Market>>> {
    let markets = MarketRepo::list(&state.pool).await?;
    Ok(Json(markets))
}
