use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use moneta_core::money::RateTable;
use moneta_core::snapshot::model::SnapshotSummary;
use moneta_core::wallet::model::{NewWallet, Wallet};
use moneta_core::wallet::traits::WalletRepositoryTrait;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(new_wallet): Json<NewWallet>,
) -> ApiResult<Json<Wallet>> {
    let wallet = state.wallets.create(new_wallet).await?;
    Ok(Json(wallet))
}

async fn list_wallets(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Wallet>>> {
    let wallets = state.wallets.list_for_user(&user_id).await?;
    Ok(Json(wallets))
}

async fn delete_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.wallets.delete(&wallet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardQuery {
    month_keys: Vec<String>,
    view_ccy: String,
    #[serde(default)]
    rates: RateTable,
}

/// `GET /wallet/user/{user_id}` (spec §6.1 "full dashboard payload"). The
/// month window, view currency and live rates all come from the caller as
/// a JSON-encoded query string, since FX is never computed server-side and
/// a GET has no body to carry the rate table in.
async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    axum::extract::Query(raw): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> ApiResult<Json<Vec<moneta_core::aggregator::model::WalletTree>>> {
    let query: DashboardQuery = match raw.get("q") {
        Some(encoded) => serde_json::from_str(encoded)
            .map_err(|e| ApiError::BadRequest(format!("invalid q parameter: {e}")))?,
        None => return Err(ApiError::BadRequest("missing q query parameter".to_string())),
    };
    let tree = state
        .aggregator
        .build_tree(&user_id, &query.month_keys, &query.view_ccy, &query.rates)
        .await?;
    Ok(Json(tree))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeRequest {
    user_id: String,
    month_keys: Vec<String>,
    view_ccy: String,
    rates: RateTable,
}

async fn manager_tree(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TreeRequest>,
) -> ApiResult<Json<Vec<moneta_core::aggregator::model::WalletTree>>> {
    let tree = state
        .aggregator
        .build_tree(&body.user_id, &body.month_keys, &body.view_ccy, &body.rates)
        .await?;
    Ok(Json(tree))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRequest {
    wallet_id: String,
    month_key: String,
    rates: RateTable,
}

/// `POST /wallet/manager/snapshot`, idempotent per `(wallet_id, month_key)`
/// since the snapshot repositories upsert on that key (spec §6.1, §4.4).
async fn manager_snapshot(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SnapshotRequest>,
) -> ApiResult<Json<SnapshotSummary>> {
    let wallet = state.wallets.get_by_id(&body.wallet_id).await?;
    let summary = state
        .snapshot_engine
        .run_for_wallet(&wallet, &body.month_key, body.rates)
        .await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet", post(create_wallet))
        .route("/wallet/user/{user_id}", get(dashboard))
        .route("/wallet/{user_id}/wallets", get(list_wallets))
        .route("/wallet/{wallet_id}", axum::routing::delete(delete_wallet))
        .route("/wallet/manager/tree", post(manager_tree))
        .route("/wallet/manager/snapshot", post(manager_snapshot))
}
