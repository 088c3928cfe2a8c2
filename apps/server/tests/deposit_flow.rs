use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use chrono::Utc;
use diesel::prelude::*;
use moneta_core::session::{HmacSessionGate, RequestStamp};
use moneta_server::config::Config;
use moneta_server::{api, build_state};
use moneta_storage_sqlite::schema::banks;
use rust_decimal::Decimal;
use std::str::FromStr;
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

/// Banks are an externally-owned read-only catalog (no create endpoint on
/// `BankRepositoryTrait`): seed one directly below the API the way a
/// migration or the owning service would.
fn seed_bank(db_path: &std::path::Path, id: &str) {
    let mut conn = SqliteConnection::establish(db_path.to_str().unwrap()).unwrap();
    diesel::insert_into(banks::table)
        .values((banks::id.eq(id), banks::name.eq("Test Bank"), banks::short_code.eq("TB")))
        .execute(&mut conn)
        .unwrap();
}

async fn build_test_router(db_path: &std::path::Path) -> axum::Router {
    std::env::set_var("MONETA_DB_PATH", db_path);
    std::env::set_var("MONETA_SESSION_HMAC_SECRET", SESSION_SECRET);

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    api::app_router(state, &config)
}

#[tokio::test]
async fn create_account_encrypts_the_account_number_at_rest() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let app = build_test_router(&db_path).await;
    seed_bank(&db_path, "bank-1");

    let create_wallet_body = r#"{"userId":"u1","name":"Main","baseCcy":null}"#;
    let response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet", Body::from(create_wallet_body)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let wallet: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let wallet_id = wallet["id"].as_str().unwrap().to_string();

    let create_account_body = serde_json::json!({
        "walletId": wallet_id,
        "bankId": "bank-1",
        "name": "Checking",
        "accountType": "CURRENT",
        "currency": "USD",
        "accountNumber": "1234567890",
        "openingBalance": "100.00",
    })
    .to_string();

    let path = format!("/wallet/{wallet_id}/accounts");
    let response = app.clone().oneshot(signed_request("POST", &path, Body::from(create_account_body))).await.unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let account: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(account.get("accountNumber").is_none(), "plaintext account number must never appear in the response");
    assert!(account["accountNumberFingerprint"].as_str().unwrap().len() > 0);

    let response = app.oneshot(signed_request("GET", &path, Body::empty())).await.unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let accounts: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(accounts.as_array().unwrap().len(), 1);

    cleanup_env();
}

#[tokio::test]
async fn transactions_page_filters_and_totals_correctly() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let app = build_test_router(&db_path).await;
    seed_bank(&db_path, "bank-1");

    let response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet", Body::from(r#"{"userId":"u1","name":"Main","baseCcy":null}"#)))
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let wallet: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let wallet_id = wallet["id"].as_str().unwrap().to_string();

    let create_account_body = serde_json::json!({
        "walletId": wallet_id,
        "bankId": "bank-1",
        "name": "Checking",
        "accountType": "CURRENT",
        "currency": "USD",
        "accountNumber": "1234567890",
        "openingBalance": "0",
    })
    .to_string();
    let response = app
        .clone()
        .oneshot(signed_request("POST", &format!("/wallet/{wallet_id}/accounts"), Body::from(create_account_body)))
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let account: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let account_id = account["id"].as_str().unwrap().to_string();

    let rows_body = serde_json::json!({
        "accountId": account_id,
        "rows": [
            {"date": "2026-01-05", "amount": "-50.00", "description": "Groceries", "category": "food", "balanceAfter": null, "capitalGainKind": null},
            {"date": "2026-01-10", "amount": "2000.00", "description": "Paycheck", "category": "income", "balanceAfter": null, "capitalGainKind": null},
            {"date": "2026-02-01", "amount": "-20.00", "description": "Coffee", "category": "food", "balanceAfter": null, "capitalGainKind": null},
        ],
    })
    .to_string();
    let response = app
        .clone()
        .oneshot(signed_request("POST", "/wallet/u1/transactions", Body::from(rows_body)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let page_path = format!("/wallet/u1/transactions/page?accountIds={account_id}&categories=food");
    let response = app.clone().oneshot(signed_request("GET", &page_path, Body::empty())).await.unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(page["totalCount"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    let usd_totals = &page["totalsByCcy"]["USD"];
    assert_eq!(
        Decimal::from_str(usd_totals["totalDebit"].as_str().unwrap()).unwrap(),
        Decimal::from_str("-70.00").unwrap()
    );
    assert_eq!(
        Decimal::from_str(usd_totals["totalCredit"].as_str().unwrap()).unwrap(),
        Decimal::ZERO
    );

    let q_path = format!("/wallet/u1/transactions/page?accountIds={account_id}&q=paycheck");
    let response = app.oneshot(signed_request("GET", &q_path, Body::empty())).await.unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["items"][0]["description"], "Paycheck");

    cleanup_env();
}
