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
async fn selling_half_a_holding_halves_grams_and_cost_basis_proportionally() {
    let app = build_test_router().await;

    let wallet_response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet", Body::from(r#"{"userId":"u1","name":"Main","baseCcy":null}"#)))
        .await
        .unwrap();
    let bytes = to_bytes(wallet_response.into_body(), usize::MAX).await.unwrap();
    let wallet: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let wallet_id = wallet["id"].as_str().unwrap().to_string();

    let new_holding = serde_json::json!({
        "walletId": wallet_id,
        "metal": "gold",
        "grams": "100",
        "costBasis": "5000",
        "costCurrency": "USD",
        "quoteSymbol": "XAUUSD",
    })
    .to_string();
    let path = format!("/wallet/{wallet_id}/metals");
    let response = app.clone().oneshot(signed_request("POST", &path, Body::from(new_holding))).await.unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let holding: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let holding_id = holding["id"].as_str().unwrap().to_string();

    let sell_body = serde_json::json!({ "gramsSold": "50", "proceeds": "3000" }).to_string();
    let sell_path = format!("/wallet/metals/{holding_id}/sell");
    let response = app.oneshot(signed_request("POST", &sell_path, Body::from(sell_body))).await.unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let result: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(Decimal::from_str(result["realizedPnl"].as_str().unwrap()).unwrap(), Decimal::from_str("500").unwrap());

    let remaining = &result["remaining"];
    assert_eq!(Decimal::from_str(remaining["grams"].as_str().unwrap()).unwrap(), Decimal::from_str("50").unwrap());
    assert_eq!(Decimal::from_str(remaining["costBasis"].as_str().unwrap()).unwrap(), Decimal::from_str("2500").unwrap());

    cleanup_env();
}
