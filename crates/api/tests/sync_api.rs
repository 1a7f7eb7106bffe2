//! HTTP-level integration tests for the `/sync/entries` batch ingestion
//! endpoint: idempotent replay, daily quota, content duplicates, per-item
//! isolation, and whole-batch shape validation.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use chrono::Utc;
use common::{body_json, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;
use tokpa_core::entry::ValidationDecision;
use tokpa_core::roles::Role;
use tokpa_core::types::DbId;
use tokpa_db::models::agent::Agent;
use tokpa_db::models::market::CreateMarket;
use tokpa_db::models::product::CreateProduct;
use tokpa_db::repositories::{EntryRepo, MarketRepo, ProductRepo};
use tower::ServiceExt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Seed one agent (with token), one product, and one market.
async fn seed_refs(pool: &PgPool) -> (Agent, String, DbId, DbId) {
    let (agent, token) = common::seed_agent(pool, "Afi", "+22990000001", Role::Agent).await;

    let product = ProductRepo::create(
        pool,
        &CreateProduct {
            name: "Tomate".to_string(),
            category: Some("Légumes".to_string()),
            units_allowed: vec!["kg".to_string()],
        },
    )
    .await
    .unwrap();

    let market = MarketRepo::create(
        pool,
        &CreateMarket {
            name: "Dantokpa".to_string(),
            city: "Cotonou".to_string(),
            lat: 6.45,
            lon: 2.43,
        },
    )
    .await
    .unwrap();

    (agent, token, product.id, market.id)
}

/// Build one submission item as the mobile client would send it.
fn item(agent: DbId, product: DbId, market: DbId, client_id: &str, price: f64) -> serde_json::Value {
    json!({
        "clientId": client_id,
        "agentId": agent,
        "productId": product,
        "marketId": market,
        "unit": "kg",
        "priceValue": price,
        "currency": "XOF",
        "lat": 6.45,
        "lon": 2.43,
        "capturedAt": Utc::now().to_rfc3339(),
    })
}

async fn entry_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_entries")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// The sync endpoint requires a Bearer token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/sync/entries", json!([])).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Acceptance and idempotent replay
// ---------------------------------------------------------------------------

/// A fresh observation is stored as pending and reported accepted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn accepted_entry_is_stored_pending(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool.clone());

    let batch = json!([item(agent.id, product, market, "c1", 500.0)]);
    let response = post_json_auth(app, "/sync/entries", batch, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let outcomes = json.as_array().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["status"], "accepted");
    assert_eq!(outcomes[0]["clientId"], "c1");
    assert!(outcomes[0]["id"].is_string());
    assert!(outcomes[0].get("reason").is_none());

    let entry_id: DbId = outcomes[0]["id"].as_str().unwrap().parse().unwrap();
    let stored = EntryRepo::find_by_id(&pool, entry_id).await.unwrap().unwrap();
    assert_eq!(stored.client_id.as_deref(), Some("c1"));
    assert_eq!(entry_count(&pool).await, 1);
}

/// Re-sending a batch with a known clientId reports the stored entry instead
/// of inserting a second row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn replay_returns_same_entry(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;

    let app = common::build_test_app(pool.clone());
    let batch = json!([item(agent.id, product, market, "c1", 500.0)]);
    let first = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;
    let first_id = first[0]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let batch = json!([item(agent.id, product, market, "c1", 500.0)]);
    let response = post_json_auth(app, "/sync/entries", batch, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json[0]["status"], "accepted");
    assert_eq!(json[0]["reason"], "Already processed");
    assert_eq!(json[0]["id"], first_id.as_str());
    assert_eq!(entry_count(&pool).await, 1, "replay must not insert");
}

/// The same clientId twice within one batch: the second item replays the first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_client_id_within_batch_replays(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool.clone());

    let batch = json!([
        item(agent.id, product, market, "c1", 500.0),
        item(agent.id, product, market, "c1", 500.0),
    ]);
    let json = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;

    assert_eq!(json[0]["status"], "accepted");
    assert!(json[0].get("reason").is_none());
    assert_eq!(json[1]["status"], "accepted");
    assert_eq!(json[1]["reason"], "Already processed");
    assert_eq!(json[1]["id"], json[0]["id"]);
    assert_eq!(entry_count(&pool).await, 1);
}

/// Replaying an entry that an admin has since rejected reports rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn replay_of_rejected_entry_reports_rejected(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let (admin, _) = common::seed_agent(&pool, "Chef", "+22990000009", Role::Admin).await;

    let app = common::build_test_app(pool.clone());
    let batch = json!([item(agent.id, product, market, "c1", 500.0)]);
    let first = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;
    let entry_id: DbId = first[0]["id"].as_str().unwrap().parse().unwrap();

    EntryRepo::apply_decision(&pool, entry_id, admin.id, ValidationDecision::Rejected, None)
        .await
        .unwrap()
        .unwrap();

    let app = common::build_test_app(pool);
    let batch = json!([item(agent.id, product, market, "c1", 500.0)]);
    let json = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;

    assert_eq!(json[0]["status"], "rejected");
    assert_eq!(json[0]["reason"], "Already processed");
    assert_eq!(json[0]["id"].as_str().unwrap(), entry_id.to_string());
}

// ---------------------------------------------------------------------------
// Daily quota
// ---------------------------------------------------------------------------

/// The fourth same-day entry for one (agent, product, market) triple is
/// refused, and the items before it in the same batch still land.
#[sqlx::test(migrations = "../../db/migrations")]
async fn fourth_entry_hits_daily_limit(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool.clone());

    let batch = json!([
        item(agent.id, product, market, "c1", 100.0),
        item(agent.id, product, market, "c2", 200.0),
        item(agent.id, product, market, "c3", 300.0),
        item(agent.id, product, market, "c4", 400.0),
    ]);
    let json = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;

    assert_eq!(json[0]["status"], "accepted");
    assert_eq!(json[1]["status"], "accepted");
    assert_eq!(json[2]["status"], "accepted");
    assert_eq!(json[3]["status"], "limit_exceeded");
    assert_eq!(
        json[3]["reason"],
        "Daily limit reached (3 entries per day per agent/product/market)"
    );
    assert!(json[3].get("id").is_none());
    assert_eq!(entry_count(&pool).await, 3);
}

/// The quota is per triple: a different product still goes through, and a
/// refused item does not poison the rest of its batch.
#[sqlx::test(migrations = "../../db/migrations")]
async fn limit_is_scoped_to_the_triple(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let other = ProductRepo::create(
        &pool,
        &CreateProduct {
            name: "Riz".to_string(),
            category: None,
            units_allowed: vec!["kg".to_string()],
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let batch = json!([
        item(agent.id, product, market, "c1", 100.0),
        item(agent.id, product, market, "c2", 200.0),
        item(agent.id, product, market, "c3", 300.0),
    ]);
    post_json_auth(app, "/sync/entries", batch, &token).await;

    let app = common::build_test_app(pool.clone());
    let batch = json!([
        item(agent.id, product, market, "c4", 400.0),
        item(agent.id, other.id, market, "c5", 400.0),
    ]);
    let json = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;

    assert_eq!(json[0]["status"], "limit_exceeded");
    assert_eq!(json[1]["status"], "accepted");
    assert_eq!(entry_count(&pool).await, 4);
}

// ---------------------------------------------------------------------------
// Content duplicates and reference failures
// ---------------------------------------------------------------------------

/// A second clientId reporting the identical observation on the same day is
/// flagged as a duplicate, not stored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn same_observation_same_day_is_duplicate(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;

    let app = common::build_test_app(pool.clone());
    let batch = json!([item(agent.id, product, market, "c1", 500.0)]);
    post_json_auth(app, "/sync/entries", batch, &token).await;

    let app = common::build_test_app(pool.clone());
    let batch = json!([item(agent.id, product, market, "c2", 500.0)]);
    let json = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;

    assert_eq!(json[0]["status"], "duplicate");
    assert_eq!(
        json[0]["reason"],
        "Entry with same product/market/unit/date/price already exists"
    );
    assert_eq!(json[0]["clientId"], "c2");
    assert!(json[0].get("id").is_none());
    assert_eq!(entry_count(&pool).await, 1);
}

/// An unknown product reference rejects that item only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_product_rejects_item(pool: PgPool) {
    let (agent, token, _product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool.clone());

    let batch = json!([item(agent.id, Uuid::new_v4(), market, "c1", 500.0)]);
    let json = body_json(post_json_auth(app, "/sync/entries", batch, &token).await).await;

    assert_eq!(json[0]["status"], "rejected");
    assert_eq!(json[0]["reason"], "Unknown product reference");
    assert_eq!(entry_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Whole-batch shape validation
// ---------------------------------------------------------------------------

/// One malformed item fails the whole batch before anything is stored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_price_fails_whole_batch(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool.clone());

    let batch = json!([
        item(agent.id, product, market, "c1", 500.0),
        item(agent.id, product, market, "c2", 0.0),
    ]);
    let response = post_json_auth(app, "/sync/entries", batch, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("entries[1]"), "got: {message}");
    assert!(message.contains("priceValue"), "got: {message}");
    assert_eq!(entry_count(&pool).await, 0, "nothing may be stored");
}

/// Currency and coordinate rules are enforced at the boundary.
#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_currency_and_coordinates_fail(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;

    let app = common::build_test_app(pool.clone());
    let mut bad_currency = item(agent.id, product, market, "c1", 500.0);
    bad_currency["currency"] = json!("xof");
    let response = post_json_auth(app, "/sync/entries", json!([bad_currency]), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let mut bad_lat = item(agent.id, product, market, "c1", 500.0);
    bad_lat["lat"] = json!(100.0);
    let response = post_json_auth(app, "/sync/entries", json!([bad_lat]), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let mut bad_lon = item(agent.id, product, market, "c1", 500.0);
    bad_lon["lon"] = json!(-200.0);
    let response = post_json_auth(app, "/sync/entries", json!([bad_lon]), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(entry_count(&pool).await, 0);
}

/// An unknown unit fails JSON deserialization with a 400, not a 422.
#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_unit_is_bad_request(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool);

    let mut bad_unit = item(agent.id, product, market, "c1", 500.0);
    bad_unit["unit"] = json!("litre");
    let response = post_json_auth(app, "/sync/entries", json!([bad_unit]), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A body that is not JSON at all is a 400 with the standard envelope.
#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_bad_request(pool: PgPool) {
    let (_, token) = common::seed_agent(&pool, "Afi", "+22990000001", Role::Agent).await;
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/sync/entries")
                .header(CONTENT_TYPE, "application/json")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

/// Omitting clientId is allowed; the outcome then carries no clientId.
#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_client_id_is_accepted(pool: PgPool) {
    let (agent, token, product, market) = seed_refs(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut no_client = item(agent.id, product, market, "unused", 500.0);
    no_client.as_object_mut().unwrap().remove("clientId");
    let json = body_json(post_json_auth(app, "/sync/entries", json!([no_client]), &token).await).await;

    assert_eq!(json[0]["status"], "accepted");
    assert!(json[0].get("clientId").is_none());
    assert!(json[0]["id"].is_string());
    assert_eq!(entry_count(&pool).await, 1);
}

/// An empty batch is a 201 with an empty outcome array.
#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_batch_returns_empty_outcomes(pool: PgPool) {
    let (_, token) = common::seed_agent(&pool, "Afi", "+22990000001", Role::Agent).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/sync/entries", json!([]), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json, json!([]));
}
