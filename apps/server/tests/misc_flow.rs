use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use chrono::Utc;
use moneta_core::session::{HmacSessionGate, RequestStamp};
use rust_decimal::Decimal;
use std::str::FromStr;
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
    let stamp_for_calc = RequestStamp { session_id: "test-session", method, path, timestamp, provided_hmac: "" };
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
async fn debt_create_update_delete_round_trip() {
    let app = build_test_router().await;

    let wallet_response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet", Body::from(r#"{"userId":"u1","name":"Main","baseCcy":null}"#)))
        .await
        .unwrap();
    let bytes = to_bytes(wallet_response.into_body(), usize::MAX).await.unwrap();
    let wallet: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let wallet_id = wallet["id"].as_str().unwrap().to_string();

    let new_debt = serde_json::json!({
        "walletId": wallet_id,
        "name": "Car loan",
        "principal": "12000",
        "currency": "USD",
        "monthlyPayment": "300",
    })
    .to_string();
    let path = format!("/wallet/{wallet_id}/debts");
    let response = app.clone().oneshot(signed_request("POST", &path, Body::from(new_debt))).await.unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let debt: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let debt_id = debt["id"].as_str().unwrap().to_string();

    let mut updated = debt.clone();
    updated["monthlyPayment"] = serde_json::json!("350");
    let response = app
        .clone()
        .oneshot(signed_request("PUT", "/wallet/debts", Body::from(updated.to_string())))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let saved: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        Decimal::from_str(saved["monthlyPayment"].as_str().unwrap()).unwrap(),
        Decimal::from_str("350").unwrap()
    );

    let response = app
        .clone()
        .oneshot(signed_request("DELETE", &format!("/wallet/debts/{debt_id}"), Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = app.oneshot(signed_request("GET", &path, Body::empty())).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let remaining: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(remaining.as_array().unwrap().len(), 0);

    cleanup_env();
}
