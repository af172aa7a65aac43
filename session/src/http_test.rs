use super::*;

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};

// =========================================================================
// Stub backend
// =========================================================================

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn stub_router() -> Router {
    Router::new()
        .route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "a@x.com" && body["password"] == "pw" {
                    Json(json!({ "token": "abc", "user": { "name": "A", "roles": ["Admin"] } })).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response()
                }
            }),
        )
        .route(
            "/register",
            post(|Json(body): Json<Value>| async move {
                if body["confirmPassword"] == body["password"] && body["name"].is_string() {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        )
        .route(
            "/admin/verify",
            post(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer admin-token") => StatusCode::NO_CONTENT,
                    Some("Bearer broken-token") => StatusCode::INTERNAL_SERVER_ERROR,
                    Some(_) => StatusCode::FORBIDDEN,
                    None => StatusCode::UNAUTHORIZED,
                }
            }),
        )
}

async fn gateway() -> HttpGateway {
    let base = spawn_stub(stub_router()).await;
    HttpGateway::new(GatewayConfig::new(base)).unwrap()
}

// =========================================================================
// login
// =========================================================================

#[tokio::test]
async fn login_returns_token_and_user() {
    let gw = gateway().await;
    let resp = gw.login(&Credentials::new("a@x.com", "pw")).await.unwrap();
    assert_eq!(resp.token, "abc");
    assert_eq!(resp.user.and_then(|u| u.name).as_deref(), Some("A"));
}

#[tokio::test]
async fn login_rejection_carries_status_and_body() {
    let gw = gateway().await;
    let err = gw.login(&Credentials::new("a@x.com", "wrong")).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Status { status: 401, body: "Invalid email or password".to_owned() }
    );
}

#[tokio::test]
async fn login_with_unreadable_body_is_decode_error() {
    let app = Router::new().route("/login", post(|| async { Json(json!({ "user": {} })) }));
    let base = spawn_stub(app).await;
    let gw = HttpGateway::new(GatewayConfig::new(base)).unwrap();

    let err = gw.login(&Credentials::new("a@x.com", "pw")).await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn login_against_closed_port_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gw = HttpGateway::new(GatewayConfig::new(format!("http://{addr}"))).unwrap();
    let err = gw.login(&Credentials::new("a@x.com", "pw")).await.unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
}

// =========================================================================
// register
// =========================================================================

#[tokio::test]
async fn register_sends_camel_case_body() {
    let gw = gateway().await;
    let reg = Registration {
        name: "A".to_owned(),
        email: "a@x.com".to_owned(),
        password: "pw".to_owned(),
        confirm_password: "pw".to_owned(),
    };
    assert_eq!(gw.register(&reg).await, Ok(()));
}

#[tokio::test]
async fn register_failure_is_status_error() {
    let gw = gateway().await;
    let reg = Registration {
        name: "A".to_owned(),
        email: "a@x.com".to_owned(),
        password: "pw".to_owned(),
        confirm_password: "other".to_owned(),
    };
    assert!(matches!(gw.register(&reg).await, Err(GatewayError::Status { status: 400, .. })));
}

// =========================================================================
// verify_admin
// =========================================================================

#[tokio::test]
async fn verify_admin_sends_bearer_token() {
    let gw = gateway().await;
    assert_eq!(gw.verify_admin("admin-token").await, Ok(204));
    assert_eq!(gw.verify_admin("customer-token").await, Ok(403));
}

#[tokio::test]
async fn verify_admin_passes_through_server_errors() {
    let gw = gateway().await;
    assert_eq!(gw.verify_admin("broken-token").await, Ok(500));
}

#[tokio::test]
async fn verify_admin_times_out() {
    let app = Router::new().route(
        "/admin/verify",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let base = spawn_stub(app).await;
    let gw = HttpGateway::new(GatewayConfig::new(base).with_timeout_secs(1)).unwrap();

    assert_eq!(gw.verify_admin("admin-token").await, Err(GatewayError::Timeout));
}
