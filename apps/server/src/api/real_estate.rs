use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_core::deposit::model::{CapitalGainKind, NewTransactionRow};
use moneta_core::real_estate::model::{NewRealEstate, RealEstate};
use moneta_core::real_estate::traits::RealEstateRepositoryTrait;

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_real_estates(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> ApiResult<Json<Vec<RealEstate>>> {
    Ok(Json(state.real_estates.list_for_wallet(&wallet_id).await?))
}

async fn create_real_estate(
    State(state): State<Arc<AppState>>,
    Json(new_re): Json<NewRealEstate>,
) -> ApiResult<Json<RealEstate>> {
    Ok(Json(state.real_estates.create(new_re).await?))
}

async fn delete_real_estate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.real_estates.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `deposit_account_id` is optional: a sale may simply remove the property
/// from the wallet, or it may also book the proceeds as a transaction on a
/// cash account with a linked capital gain (spec §6.1 "sell with optional
/// linked Transaction and CapitalGain").
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SellRealEstateRequest {
    proceeds: Decimal,
    deposit_account_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SellRealEstateResponse {
    realized_pnl: Decimal,
}

async fn sell_real_estate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SellRealEstateRequest>,
) -> ApiResult<Json<SellRealEstateResponse>> {
    let real_estate = state.real_estates.get_by_id(&id).await?;
    let realized_pnl = body.proceeds - real_estate.purchase_price;

    if let Some(account_id) = &body.deposit_account_id {
        let row = NewTransactionRow {
            date: Utc::now().date_naive(),
            amount: body.proceeds,
            description: format!("Sale of {}", real_estate.name),
            category: Some("real_estate_sale".to_string()),
            balance_after: None,
            capital_gain_kind: Some(CapitalGainKind::RealEstateRealizedPnl),
        };
        state.transaction_service.batch_create(account_id, vec![row]).await?;
    }

    state.real_estates.delete(&id).await?;
    Ok(Json(SellRealEstateResponse { realized_pnl }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet/{wallet_id}/real-estates", get(list_real_estates).post(create_real_estate))
        .route("/wallet/real-estates/{id}", axum::routing::delete(delete_real_estate))
        .route("/wallet/real-estates/{id}/sell", post(sell_real_estate))
}
