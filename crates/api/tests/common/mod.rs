#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
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

use roster_api::auth::jwt::{generate_access_token, JwtConfig, DEFAULT_AUDIENCE, DEFAULT_ISSUER};
use roster_api::auth::password::hash_password;
use roster_api::config::ServerConfig;
use roster_api::routes;
use roster_api::state::AppState;
use roster_core::roles::{ROLE_ADMIN, ROLE_USER};
use roster_db::models::user::{CreateUser, User};
use roster_db::repositories::{RoleRepo, UserRepo};
use roster_db::ReadStrategy;

pub const TEST_PASSWORD: &str = "test_password_123!";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        issuer: DEFAULT_ISSUER.to_string(),
        audience: DEFAULT_AUDIENCE.to_string(),
        expiry_mins: 60,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(read_strategy: ReadStrategy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        read_strategy,
        seed_lookup_data: false,
        bootstrap_admin: None,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests exercise
/// the same middleware stack production uses. Roles are seeded first, as they
/// are at startup.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, ReadStrategy::Inline).await
}

pub async fn build_test_app_with(pool: PgPool, read_strategy: ReadStrategy) -> Router {
    roster_db::seed::seed_roles(&pool)
        .await
        .expect("role seeding should succeed");

    let state = AppState {
        pool,
        config: Arc::new(test_config(read_strategy)),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
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
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with the given role directly and return the stored row.
/// The password is [`TEST_PASSWORD`]. Roles are seeded first, so this works
/// before or after [`build_test_app`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    roster_db::seed::seed_roles(pool)
        .await
        .expect("role seeding should succeed");
    let role = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role should exist");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role_id: role.id,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint a token for a freshly created admin.
pub async fn admin_token(pool: &PgPool) -> String {
    let user = create_user(pool, "admin_user", ROLE_ADMIN).await;
    generate_access_token(user.id, &user.username, ROLE_ADMIN, &test_jwt_config()).unwrap()
}

/// Mint a token for a freshly created regular user.
pub async fn user_token(pool: &PgPool) -> String {
    let user = create_user(pool, "plain_user", ROLE_USER).await;
    generate_access_token(user.id, &user.username, ROLE_USER, &test_jwt_config()).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
