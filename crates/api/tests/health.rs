//! Integration tests for the health endpoint and cross-cutting HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /health reports status, version, and database health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_and_db_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(
        json["version"].is_string(),
        "version must be reported as a string"
    );
}

// ---------------------------------------------------------------------------
// Test: unknown routes fall through to 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/no-such-route").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: every response carries a UUID x-request-id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let id_str = response
        .headers()
        .get("x-request-id")
        .expect("response must carry x-request-id")
        .to_str()
        .unwrap();
    // Hyphenated UUID, e.g. 67e55044-10b1-426f-9247-bb680e5fe0c8.
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}
