use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use moneta_core::brokerage::model::{BrokerageAccount, BrokerageDepositLink, BrokerageEvent, Holding, NewBrokerageEvent};
use moneta_core::brokerage::traits::{BrokerageAccountRepositoryTrait, BrokerageDepositLinkRepositoryTrait, HoldingRepositoryTrait};
use moneta_core::money::RateTable;

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> ApiResult<Json<Vec<BrokerageAccount>>> {
    Ok(Json(state.brokerage_accounts.list_for_wallet(&wallet_id).await?))
}

async fn list_holdings(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<Vec<(String, Holding)>>> {
    Ok(Json(state.holdings.list_for_account(&account_id).await?))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewLinkBody {
    deposit_account_id: String,
    currency: String,
}

async fn create_link(
    State(state): State<Arc<AppState>>,
    Path(brokerage_account_id): Path<String>,
    Json(body): Json<NewLinkBody>,
) -> ApiResult<Json<BrokerageDepositLink>> {
    let link = BrokerageDepositLink {
        id: Uuid::new_v4().to_string(),
        brokerage_account_id,
        deposit_account_id: body.deposit_account_id,
        currency: body.currency,
    };
    Ok(Json(state.brokerage_links.create(link).await?))
}

async fn list_links(
    State(state): State<Arc<AppState>>,
    Path(brokerage_account_id): Path<String>,
) -> ApiResult<Json<Vec<BrokerageDepositLink>>> {
    Ok(Json(state.brokerage_links.list_for_brokerage(&brokerage_account_id).await?))
}

async fn delete_link(
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.brokerage_links.delete(&link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventBody {
    event: NewBrokerageEvent,
    rates: RateTable,
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateEventBody>,
) -> ApiResult<Json<BrokerageEvent>> {
    let event = state.brokerage_service.create_event(body.event, &body.rates).await?;
    Ok(Json(event))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteEventBody {
    rates: RateTable,
}

async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(body): Json<DeleteEventBody>,
) -> ApiResult<StatusCode> {
    state.brokerage_service.delete_event(&event_id, &body.rates).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEventsBody {
    events: Vec<NewBrokerageEvent>,
    rates: RateTable,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEventFailureDto {
    id: String,
    detail: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEventResultDto {
    updated: usize,
    failed: Vec<BatchEventFailureDto>,
}

/// `POST /wallet/{user_id}/events/import` (spec §6.1). Expects an already
/// parsed list of events — CSV/PDF statement parsing is a surrounding
/// concern out of scope here (spec §1) — and applies them as one batch
/// with per-item failure isolation (spec §7).
async fn import_events(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ImportEventsBody>,
) -> ApiResult<Json<BatchEventResultDto>> {
    let result = state.brokerage_service.batch_create(body.events, &body.rates).await;
    Ok(Json(BatchEventResultDto {
        updated: result.updated,
        failed: result
            .failed
            .into_iter()
            .map(|f| BatchEventFailureDto { id: f.id, detail: f.detail })
            .collect(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet/{wallet_id}/brokerage-accounts", get(list_accounts))
        .route("/wallet/brokerage-accounts/{account_id}/holdings", get(list_holdings))
        .route(
            "/wallet/brokerage-accounts/{brokerage_account_id}/links",
            post(create_link).get(list_links),
        )
        .route("/wallet/brokerage-links/{link_id}", axum::routing::delete(delete_link))
        .route("/wallet/{user_id}/events", post(create_event))
        .route("/wallet/{user_id}/events/{event_id}", axum::routing::delete(delete_event))
        .route("/wallet/{user_id}/events/import", post(import_events))
}
