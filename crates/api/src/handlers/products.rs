//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tokpa_db::models::product::{CreateProduct, Product};
use tokpa_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Request body for `POST /products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: Option<String>,
    pub units_allowed: Vec<String>,
}

/// POST /products
///
/// Create a product. Any authenticated agent may add reference data.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_agent): RequireAuth,
    AppJson(input): AppJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if input.units_allowed.is_empty() {
        return Err(AppError::BadRequest(
            "unitsAllowed must contain at least one unit".into(),
        ));
    }

    let product = ProductRepo::create(
        &state.pool,
        &CreateProduct {
            name: name.to_string(),
            category: input.category,
            units_allowed: input.units_allowed,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products
///
/// List all products, ordered by name. Public: the mobile app loads this
/// before the agent logs in.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}
