use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Serialize;

use moneta_core::metals::model::{MetalHolding, NewMetalHolding, SellMetalRequest};
use moneta_core::metals::traits::MetalHoldingRepositoryTrait;

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_metals(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> ApiResult<Json<Vec<MetalHolding>>> {
    Ok(Json(state.metal_holdings.list_for_wallet(&wallet_id).await?))
}

async fn create_metal(
    State(state): State<Arc<AppState>>,
    Json(new_holding): Json<NewMetalHolding>,
) -> ApiResult<Json<MetalHolding>> {
    Ok(Json(state.metal_holdings.create(new_holding).await?))
}

async fn delete_metal(
    State(state): State<Arc<AppState>>,
    Path(holding_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.metal_holdings.save_or_delete(&holding_id, None).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SellMetalResponse {
    remaining: Option<MetalHolding>,
    realized_pnl: Decimal,
}

async fn sell_metal(
    State(state): State<Arc<AppState>>,
    Path(holding_id): Path<String>,
    Json(request): Json<SellMetalRequest>,
) -> ApiResult<Json<SellMetalResponse>> {
    let result = state.metal_service.sell(&holding_id, request).await?;
    Ok(Json(SellMetalResponse { remaining: result.remaining, realized_pnl: result.realized_pnl }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet/{wallet_id}/metals", get(list_metals).post(create_metal))
        .route("/wallet/metals/{holding_id}", axum::routing::delete(delete_metal))
        .route("/wallet/metals/{holding_id}/sell", post(sell_metal))
}
