use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_core::deposit::model::{
    DepositAccount, NewDepositAccount, NewTransactionRow, Transaction, TransactionStatus,
};
use moneta_core::deposit::traits::{DepositAccountRepositoryTrait, TransactionRepositoryTrait};

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> ApiResult<Json<Vec<DepositAccount>>> {
    let accounts = state.deposit_accounts.list_for_wallet(&wallet_id).await?;
    Ok(Json(accounts))
}

/// Account numbers never reach this handler in ciphertext form; it encrypts
/// and fingerprints with the server's keys before the repository ever sees
/// the row (spec §9 "encryption at rest for account numbers").
async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(new_account): Json<NewDepositAccount>,
) -> ApiResult<Json<DepositAccount>> {
    let fingerprint = state.account_crypto.fingerprint(&new_account.account_number);
    let ciphertext = state.account_crypto.encrypt(&new_account.account_number)?;
    let account = state.deposit_accounts.create(new_account, fingerprint, ciphertext).await?;
    Ok(Json(account))
}

#[derive(Deserialize)]
struct RenameAccount {
    name: String,
}

async fn rename_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
    Json(body): Json<RenameAccount>,
) -> ApiResult<Json<DepositAccount>> {
    let account = state.deposit_accounts.update_name(&account_id, &body.name).await?;
    Ok(Json(account))
}

async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.deposit_accounts.delete(&account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionsBody {
    account_id: String,
    rows: Vec<NewTransactionRow>,
}

/// `{user_id}` in the path only anchors the route under the `SessionGate`
/// (spec §6.1); the account being posted to is named in the body since one
/// user may hold several deposit accounts.
async fn create_transactions(
    State(state): State<Arc<AppState>>,
    Path(_user_id): Path<String>,
    Json(body): Json<CreateTransactionsBody>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let created = state.transaction_service.batch_create(&body.account_id, body.rows).await?;
    Ok(Json(created))
}

#[derive(Deserialize)]
struct AmountUpdate {
    id: String,
    amount: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTransactionsBody {
    account_id: String,
    updates: Vec<AmountUpdate>,
}

async fn update_transaction_amounts(
    State(state): State<Arc<AppState>>,
    Path(_user_id): Path<String>,
    Json(body): Json<UpdateTransactionsBody>,
) -> ApiResult<StatusCode> {
    let updates = body.updates.into_iter().map(|u| (u.id, u.amount)).collect();
    state.transaction_service.batch_update_amounts(&body.account_id, updates).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    /// Comma-separated `DepositAccount` ids (spec §6.1 "filters: accounts,
    /// categories, statuses, date range, q").
    account_ids: String,
    #[serde(default)]
    page: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
    categories: Option<String>,
    statuses: Option<String>,
    /// Free-text match against `description`, case-insensitive substring.
    q: Option<String>,
    from_date: Option<chrono::NaiveDate>,
    to_date: Option<chrono::NaiveDate>,
}

fn default_page_size() -> usize {
    50
}

fn comma_separated(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

fn parse_status(raw: &str) -> Option<TransactionStatus> {
    serde_json::from_str(&format!("\"{}\"", raw.trim())).ok()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionPage {
    items: Vec<Transaction>,
    total_count: usize,
    /// Debit/credit totals keyed by the owning account's currency, since
    /// `account_ids` may span accounts in different currencies.
    totals_by_ccy: HashMap<String, CcyTotals>,
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CcyTotals {
    total_debit: Decimal,
    total_credit: Decimal,
}

/// `GET /wallet/{user_id}/transactions/page` (spec §6.1 "paginated with
/// filters + per-CCY totals"). The ledger stays small enough per account
/// that filtering and paging happen in memory over `list_for_account`
/// rather than growing the repository trait with a bespoke query method.
async fn transactions_page(
    State(state): State<Arc<AppState>>,
    Path(_user_id): Path<String>,
    Query(q): Query<PageQuery>,
) -> ApiResult<Json<TransactionPage>> {
    let account_ids = comma_separated(&q.account_ids);
    let categories = q.categories.as_deref().map(comma_separated);
    let statuses: Option<Vec<TransactionStatus>> =
        q.statuses.as_deref().map(|raw| comma_separated(raw).iter().filter_map(|s| parse_status(s)).collect());
    let needle = q.q.as_ref().map(|s| s.to_lowercase());

    let mut rows_by_ccy: HashMap<String, Vec<Transaction>> = HashMap::new();
    for account_id in &account_ids {
        let account = state.deposit_accounts.get_by_id(account_id).await?;
        let rows = state.transactions.list_for_account(account_id).await?;
        rows_by_ccy.entry(account.currency).or_default().extend(rows);
    }

    let mut all_rows: Vec<Transaction> = rows_by_ccy.values().flatten().cloned().collect();
    all_rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

    let matches = |t: &Transaction| -> bool {
        if let Some(categories) = &categories {
            if !categories.iter().any(|c| t.category.as_deref() == Some(c.as_str())) {
                return false;
            }
        }
        if let Some(statuses) = &statuses {
            if !statuses.contains(&t.status) {
                return false;
            }
        }
        if let Some(needle) = &needle {
            if !t.description.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(from) = q.from_date {
            if t.date < from {
                return false;
            }
        }
        if let Some(to) = q.to_date {
            if t.date > to {
                return false;
            }
        }
        true
    };
    all_rows.retain(matches);

    let mut totals_by_ccy: HashMap<String, CcyTotals> = HashMap::new();
    for (ccy, rows) in &rows_by_ccy {
        let mut totals = CcyTotals::default();
        for t in rows.iter().filter(|t| matches(t)) {
            if t.amount.is_sign_negative() {
                totals.total_debit += t.amount;
            } else {
                totals.total_credit += t.amount;
            }
        }
        totals_by_ccy.insert(ccy.clone(), totals);
    }

    let total_count = all_rows.len();
    let start = q.page.saturating_mul(q.page_size).min(all_rows.len());
    let end = start.saturating_add(q.page_size).min(all_rows.len());
    let items = all_rows[start..end].to_vec();

    Ok(Json(TransactionPage { items, total_count, totals_by_ccy }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet/{wallet_id}/accounts", get(list_accounts).post(create_account))
        .route("/wallet/accounts/{account_id}", patch(rename_account).delete(delete_account))
        .route(
            "/wallet/{user_id}/transactions",
            post(create_transactions).patch(update_transaction_amounts),
        )
        .route("/wallet/{user_id}/transactions/page", get(transactions_page))
}
