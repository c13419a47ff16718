//! Integration tests for the vendor catalog endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, seed_item, seed_price, seed_vendor, send_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /vendors on an empty catalog returns an empty list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_vendors_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: GET /vendors sorts by name and annotates price ranges
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_vendors_sorted_with_price_range(pool: PgPool) {
    let b = seed_vendor(&pool, "우아한스튜디오", "STUDIO", "SEOUL").await;
    let item = seed_item(&pool, b, "기본 촬영", "single", true).await;
    seed_price(&pool, item, "평일", 1_500_000, true).await;
    seed_price(&pool, item, "주말", 2_000_000, false).await;

    // Sorts before the other by name, has no prices.
    seed_vendor(&pool, "빛나는드레스", "DRESS", "SEOUL").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["name"], "빛나는드레스");
    assert_eq!(data[0]["price_range"], json!(null));

    assert_eq!(data[1]["name"], "우아한스튜디오");
    assert_eq!(data[1]["price_range"]["base"], 1_500_000);
    assert_eq!(data[1]["price_range"]["max"], 2_000_000);
}

// ---------------------------------------------------------------------------
// Test: category filter narrows the list, price envelope excludes vendors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_vendors_category_and_price_filter(pool: PgPool) {
    let studio = seed_vendor(&pool, "스튜디오A", "STUDIO", "SEOUL").await;
    let item = seed_item(&pool, studio, "패키지", "single", true).await;
    seed_price(&pool, item, "기본", 2_500_000, true).await;
    seed_price(&pool, item, "프리미엄", 3_000_000, false).await;

    seed_vendor(&pool, "드레스B", "DRESS", "SEOUL").await;

    // Category filter: only the studio remains.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/vendors?category=STUDIO").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "스튜디오A");

    // A vendor whose cheapest configuration is 2.5M cannot fit a 2M budget.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors?category=STUDIO&maxPrice=2000000").await;
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: invalid enum query parameters are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_vendors_invalid_category_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/vendors?category=CASTLE").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors?region=MARS").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: GET /vendors/{id} returns the tree plus the initial selection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_detail_includes_initial_selection(pool: PgPool) {
    let vendor = seed_vendor(&pool, "스튜디오A", "STUDIO", "SEOUL").await;
    let item = seed_item(&pool, vendor, "기본 촬영", "single", true).await;
    let default_price = seed_price(&pool, item, "평일", 1_500_000, true).await;
    seed_price(&pool, item, "주말", 2_000_000, false).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/vendors/{vendor}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["name"], "스튜디오A");
    assert_eq!(data["category"], "STUDIO");
    assert_eq!(data["items"].as_array().unwrap().len(), 1);

    // A required single-mode item starts on its default price.
    assert_eq!(
        data["initial_selection"]["single"][item.to_string()],
        default_price.to_string()
    );
}

// ---------------------------------------------------------------------------
// Test: GET /vendors/{id} misses with 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_detail_unknown_id_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/vendors/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: POST /vendors/{id}/quote prices a saved selection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_prices_saved_selection(pool: PgPool) {
    let vendor = seed_vendor(&pool, "스튜디오A", "STUDIO", "SEOUL").await;
    let item = seed_item(&pool, vendor, "기본 패키지", "single", true).await;
    seed_price(&pool, item, "평일", 1_500_000, true).await;
    let weekend = seed_price(&pool, item, "주말", 2_000_000, false).await;

    let body = json!({
        "single": { (item.to_string()): weekend.to_string() },
        "multi": {}
    });

    let app = common::build_test_app(pool);
    let response = send_json(
        app,
        Method::POST,
        &format!("/api/v1/vendors/{vendor}/quote"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["base_total"], 1_500_000);
    assert_eq!(data["selected_total"], 2_000_000);
    assert_eq!(data["max_total"], 2_000_000);
    assert_eq!(data["lines"][0], "기본 패키지: 주말");
}

// ---------------------------------------------------------------------------
// Test: quote replay drops stale price ids instead of failing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_ignores_stale_price_id(pool: PgPool) {
    let vendor = seed_vendor(&pool, "스튜디오A", "STUDIO", "SEOUL").await;
    let item = seed_item(&pool, vendor, "기본 패키지", "single", true).await;
    seed_price(&pool, item, "평일", 1_500_000, true).await;

    // The saved price id no longer exists; the default must win.
    let body = json!({
        "single": { (item.to_string()): "11111111-1111-1111-1111-111111111111" },
        "multi": {}
    });

    let app = common::build_test_app(pool);
    let response = send_json(
        app,
        Method::POST,
        &format!("/api/v1/vendors/{vendor}/quote"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["selected_total"], 1_500_000);
}
