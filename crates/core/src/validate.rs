//! Range and format checks for price submissions.
//!
//! These run at the API boundary before the ingestion pipeline: a batch with
//! any failing item is rejected whole. The price and currency boundaries are
//! mirrored by CHECK constraints on `price_entries`.

use rust_decimal::Decimal;

/// Minimum accepted price. The floor is 1, not "positive": sub-unit prices
/// are always data-entry mistakes in CFA francs.
pub const MIN_PRICE_VALUE: Decimal = Decimal::ONE;

/// Validate that a price is at or above the minimum.
pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price < MIN_PRICE_VALUE {
        return Err(format!("priceValue must be at least 1, got {price}"));
    }
    Ok(())
}

/// Validate that a currency code is exactly three uppercase ASCII letters.
pub fn validate_currency(code: &str) -> Result<(), String> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(format!(
            "currency must match ^[A-Z]{{3}}$ (e.g. XOF), got '{code}'"
        ))
    }
}

/// Validate a latitude in decimal degrees.
pub fn validate_latitude(lat: f64) -> Result<(), String> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(format!("lat must be within [-90, 90], got {lat}"))
    }
}

/// Validate a longitude in decimal degrees.
pub fn validate_longitude(lon: f64) -> Result<(), String> {
    if lon.is_finite() && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(format!("lon must be within [-180, 180], got {lon}"))
    }
}

/// Validate an optional idempotency key: absent is fine, empty is not.
pub fn validate_client_id(client_id: Option<&str>) -> Result<(), String> {
    match client_id {
        Some(id) if id.trim().is_empty() => Err("clientId must not be empty".to_string()),
        _ => Ok(()),
    }
}
