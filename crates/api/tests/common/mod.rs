use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use weddit_api::config::ServerConfig;
use weddit_api::routes;
use weddit_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Upstream integrations (Kakao, spreadsheet, stats page) are left
/// unconfigured so tests never reach the network.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        kakao_rest_key: None,
        import_sheet_url: None,
        market_stats_url: None,
    }
}

/// Build an `AppState` over the given pool, for tests that drive handler
/// internals directly instead of going through the router.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        http: reqwest::Client::new(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = test_state(pool);

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a GET request with a `Cookie` header.
pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a JSON request with the given method and body.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a JSON request carrying a `Cookie` header.
pub async fn send_json_with_cookie(
    app: Router,
    method: Method,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("Cookie", cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a DELETE request, optionally with a `Cookie` header.
pub async fn delete(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Extract the `weddit_compare` Set-Cookie value as a `Cookie` header string.
pub fn compare_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("response must carry Set-Cookie")
        .to_str()
        .unwrap();
    // Keep only the name=value pair, drop attributes.
    set_cookie.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a vendor row and return its id.
pub async fn seed_vendor(pool: &PgPool, name: &str, category: &str, region: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO vendors (name, category, region) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(category)
    .bind(region)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an item row and return its id.
pub async fn seed_item(
    pool: &PgPool,
    vendor_id: Uuid,
    name: &str,
    mode: &str,
    required: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO items (vendor_id, name, selection_mode, required, position)
         VALUES ($1, $2, $3, $4,
                 (SELECT COALESCE(MAX(position) + 1, 0) FROM items WHERE vendor_id = $1))
         RETURNING id",
    )
    .bind(vendor_id)
    .bind(name)
    .bind(mode)
    .bind(required)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a price row and return its id.
pub async fn seed_price(
    pool: &PgPool,
    item_id: Uuid,
    name: &str,
    price: i64,
    is_default: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO prices (item_id, name, price, is_default, position)
         VALUES ($1, $2, $3, $4,
                 (SELECT COALESCE(MAX(position) + 1, 0) FROM prices WHERE item_id = $1))
         RETURNING id",
    )
    .bind(item_id)
    .bind(name)
    .bind(price)
    .bind(is_default)
    .fetch_one(pool)
    .await
    .unwrap()
}
