use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use chrono::Utc;
use diesel::prelude::*;
use moneta_core::session::{HmacSessionGate, RequestStamp};
use rust_decimal::Decimal;
use std::str::FromStr;
use moneta_server::config::Config;
use moneta_server::{api, build_state};
use moneta_storage_sqlite::schema::{banks, brokerage_accounts, instruments};
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

/// Brokerage accounts and instruments are catalogs with no create endpoint
/// on their repository traits; seed them directly the way the owning
/// back-office tooling would.
fn seed_broker_fixtures(db_path: &std::path::Path, wallet_id: &str) -> (String, String) {
    let mut conn = SqliteConnection::establish(db_path.to_str().unwrap()).unwrap();
    diesel::insert_into(banks::table)
        .values((banks::id.eq("bank-1"), banks::name.eq("Test Broker"), banks::short_code.eq("TB")))
        .execute(&mut conn)
        .unwrap();

    let account_id = "brk-1".to_string();
    let now = chrono::Utc::now().naive_utc();
    diesel::insert_into(brokerage_accounts::table)
        .values((
            brokerage_accounts::id.eq(&account_id),
            brokerage_accounts::wallet_id.eq(wallet_id),
            brokerage_accounts::bank_id.eq("bank-1"),
            brokerage_accounts::name.eq("Main Brokerage"),
            brokerage_accounts::created_at.eq(now),
        ))
        .execute(&mut conn)
        .unwrap();

    let instrument_id = "instr-1".to_string();
    diesel::insert_into(instruments::table)
        .values((
            instruments::id.eq(&instrument_id),
            instruments::symbol.eq("ACME"),
            instruments::instrument_type.eq("STOCK"),
            instruments::reporting_currency.eq("USD"),
        ))
        .execute(&mut conn)
        .unwrap();

    (account_id, instrument_id)
}

async fn build_test_router(db_path: &std::path::Path) -> axum::Router {
    std::env::set_var("MONETA_DB_PATH", db_path);
    std::env::set_var("MONETA_SESSION_HMAC_SECRET", SESSION_SECRET);

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    api::app_router(state, &config)
}

#[tokio::test]
async fn batch_import_applies_valid_events_and_isolates_the_invalid_one() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let app = build_test_router(&db_path).await;

    let wallet_response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet", Body::from(r#"{"userId":"u1","name":"Main","baseCcy":null}"#)))
        .await
        .unwrap();
    let bytes = to_bytes(wallet_response.into_body(), usize::MAX).await.unwrap();
    let wallet: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let wallet_id = wallet["id"].as_str().unwrap().to_string();

    let (account_id, instrument_id) = seed_broker_fixtures(&db_path, &wallet_id);

    let import_body = serde_json::json!({
        "events": [
            {
                "accountId": account_id,
                "instrumentId": instrument_id,
                "tradeAt": "2026-01-10T00:00:00",
                "eventType": "BUY",
                "quantity": "10",
                "unitPrice": "100",
                "currency": "USD",
                "splitRatio": null,
            },
            {
                "accountId": account_id,
                "instrumentId": "nonexistent-instrument",
                "tradeAt": "2026-01-11T00:00:00",
                "eventType": "BUY",
                "quantity": "5",
                "unitPrice": "50",
                "currency": "USD",
                "splitRatio": null,
            },
        ],
        "rates": {},
    })
    .to_string();

    let response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet/u1/events/import", Body::from(import_body)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let result: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(result["updated"], 1);
    assert_eq!(result["failed"].as_array().unwrap().len(), 1);

    let holdings_path = format!("/wallet/brokerage-accounts/{account_id}/holdings");
    let response = app.oneshot(signed_request("GET", &holdings_path, Body::empty())).await.unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let holdings: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(holdings.as_array().unwrap().len(), 1);
    assert_eq!(
        Decimal::from_str(holdings[0][1]["quantity"].as_str().unwrap()).unwrap(),
        Decimal::from_str("10").unwrap()
    );

    cleanup_env();
}

#[tokio::test]
async fn debug_wallet_response() {
    std::env::set_var("MONETA_DB_PATH", "/tmp/debugwallet.db");
    let _ = std::fs::remove_file("/tmp/debugwallet.db");
    std::env::set_var("MONETA_SESSION_HMAC_SECRET", SESSION_SECRET);
    let config = Config::from_env();
    let state = moneta_server::build_state(&config).await.unwrap();
    use moneta_core::wallet::model::NewWallet;
    use moneta_core::wallet::traits::WalletRepositoryTrait;
    let res = state.wallets.create(NewWallet { user_id: "u1".to_string(), name: "Main".to_string(), base_ccy: None }).await;
    println!("RESULT: {:?}", res.err());
    cleanup_env();
}
