//! HTTP-level checks for paths that are decided before any database access.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

use gigmarket_core::config::from_pairs;
use gigmarket_domain::id::AccountId;
use gigmarket_marketplace::config::MarketplaceConfig;
use gigmarket_marketplace::router::build_router;
use gigmarket_marketplace::state::AppState;
use gigmarket_testing::auth::{MockAuth, TEST_JWT_SECRET};

fn app() -> Router {
    let pairs = [
        ("DATABASE_URL", "postgres://unused"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("ACTIVATION_SECRET", "router-test-activation"),
        ("PUBLIC_BASE_URL", "http://localhost:3110"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()));
    let config: MarketplaceConfig = from_pairs(pairs).unwrap();
    build_router(AppState::new(DatabaseConnection::Disconnected, &config))
}

async fn send(request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let resp = app().oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

fn post_json(uri: &str, body: Value, auth: Option<HeaderMap>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    for (name, value) in auth.iter().flatten() {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn registration(confirm_password: &str, phone_number: &str) -> Value {
    json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "pw-one",
        "confirm_password": confirm_password,
        "phone_number": phone_number,
        "location": "Dhaka",
    })
}

#[tokio::test]
async fn should_answer_liveness_with_request_id() {
    let (status, headers, _) =
        send(Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let (status, _, _) = send(Request::get("/readyz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_mismatched_passwords_on_register() {
    let (status, _, body) =
        send(post_json("/register/", registration("pw-two", "0123"), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "PASSWORD_MISMATCH");
    assert_eq!(body["field"], "confirm_password");
}

#[tokio::test]
async fn should_name_missing_field_on_register() {
    let (status, _, body) = send(post_json("/register/", registration("pw-one", ""), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_FIELD");
    assert_eq!(body["field"], "phone_number");
}

#[tokio::test]
async fn should_redirect_garbage_activation_to_register() {
    let (status, headers, _) = send(
        Request::get("/active/garbage/1-abc/")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/register/");
}

#[tokio::test]
async fn should_require_username_on_login() {
    let (status, _, body) =
        send(post_json("/login/", json!({"password": "pw"}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "username");
}

#[tokio::test]
async fn should_reject_anonymous_logout() {
    let (status, _, _) = send(post_json("/logout/", json!({"refresh": "x"}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_refresh_token_as_bearer_on_logout() {
    let auth = MockAuth::new(AccountId::new());
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {}", auth.refresh_token().token).parse().unwrap(),
    );
    let (status, _, _) = send(post_json("/logout/", json!({}), Some(headers))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_refresh_token_on_logout() {
    let auth = MockAuth::new(AccountId::new());
    let (status, _, body) = send(post_json("/logout/", json!({}), Some(auth.headers()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "REFRESH_TOKEN_REQUIRED");
}

#[tokio::test]
async fn should_reject_malformed_refresh_token_on_logout() {
    let auth = MockAuth::new(AccountId::new());
    let (status, _, body) = send(post_json(
        "/logout/",
        json!({"refresh": "garbage"}),
        Some(auth.headers()),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_foreign_refresh_token_on_logout() {
    let caller = MockAuth::new(AccountId::new());
    let other = MockAuth::new(AccountId::new());
    let (status, _, body) = send(post_json(
        "/logout/",
        json!({"refresh": other.refresh_token().token}),
        Some(caller.headers()),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_require_refresh_token_on_refresh() {
    let (status, _, body) = send(post_json("/token/refresh/", json!({}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "REFRESH_TOKEN_REQUIRED");
}

#[tokio::test]
async fn should_reject_garbage_refresh_token() {
    let (status, _, body) =
        send(post_json("/token/refresh/", json!({"refresh": "garbage"}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn should_forbid_anonymous_job_creation() {
    let (status, _, body) = send(post_json(
        "/jobs/",
        json!({"title": "t", "description": "d"}),
        None,
    ))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_forbid_anonymous_admin_listing() {
    let (status, _, body) = send(Request::get("/list/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_reject_non_uuid_author_filter() {
    let (status, _, _) = send(
        Request::get("/jobs/?author=42")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
