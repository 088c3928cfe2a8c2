use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use chrono::Utc;
use moneta_core::session::{HmacSessionGate, RequestStamp};
use moneta_server::config::Config;
use moneta_server::{api, build_state};
use tempfile::tempdir;
use tower::ServiceExt;

const SESSION_SECRET: &str = "test-session-secret";

fn cleanup_env() {
    for key in ["MONETA_DB_PATH", "MONETA_HMAC_SECRET", "MONETA_SESSION_HMAC_SECRET"] {
        std::env::remove_var(key);
    }
}

fn signed_request(method: &str, path: &str, body: Body) -> Request<Body> {
    let gate = HmacSessionGate::new(SESSION_SECRET.as_bytes().to_vec());
    let timestamp = Utc::now().timestamp();
    let stamp_for_calc = RequestStamp {
        session_id: "test-session",
        method,
        path,
        timestamp,
        provided_hmac: "",
    };
    let token = gate.calculate_token(&stamp_for_calc);

    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-session-id", "test-session")
        .header("x-timestamp", timestamp.to_string())
        .header("x-hmac-signature", token)
        .body(body)
        .unwrap()
}

async fn build_test_router() -> axum::Router {
    let tmp = tempdir().unwrap();
    std::env::set_var("MONETA_DB_PATH", tmp.path().join("test.db"));
    std::env::set_var("MONETA_SESSION_HMAC_SECRET", SESSION_SECRET);

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    api::app_router(state, &config)
}

#[tokio::test]
async fn wallet_routes_reject_requests_without_a_session_stamp() {
    let app = build_test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wallet")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"userId":"u1","name":"Main"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    cleanup_env();
}

#[tokio::test]
async fn create_and_list_wallets_with_a_valid_stamp() {
    let app = build_test_router().await;

    let create_body = r#"{"userId":"u1","name":"Main","baseCcy":"USD"}"#;
    let response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet", Body::from(create_body)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let wallet: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(wallet["userId"], "u1");
    assert_eq!(wallet["name"], "Main");
    assert_eq!(wallet["baseCcy"], "USD");

    let response = app
        .oneshot(signed_request("GET", "/wallet/u1/wallets", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let wallets: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(wallets.as_array().unwrap().len(), 1);

    cleanup_env();
}

#[tokio::test]
async fn stamp_for_a_different_path_is_rejected() {
    let app = build_test_router().await;

    // A stamp computed for one path must not authenticate a request to another:
    // the session gate hashes the path into the canonical message, so a client
    // cannot replay a stamp from one wallet route onto another.
    let mut request = signed_request("GET", "/wallet/u1/wallets", Body::empty());
    *request.uri_mut() = "/wallet/someone-else/wallets".parse().unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), 401);
    cleanup_env();
}
