use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use moneta_core::misc::model::{Debt, RecurringExpense, UserNote, YearGoal};
use moneta_core::misc::traits::{DebtRepositoryTrait, RecurringExpenseRepositoryTrait, UserNoteRepositoryTrait, YearGoalRepositoryTrait};

use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewDebt {
    wallet_id: String,
    name: String,
    principal: rust_decimal::Decimal,
    currency: String,
    monthly_payment: rust_decimal::Decimal,
}

async fn list_debts(State(state): State<Arc<AppState>>, Path(wallet_id): Path<String>) -> ApiResult<Json<Vec<Debt>>> {
    Ok(Json(state.debts.list_for_wallet(&wallet_id).await?))
}

async fn create_debt(State(state): State<Arc<AppState>>, Json(body): Json<NewDebt>) -> ApiResult<Json<Debt>> {
    let debt = Debt {
        id: Uuid::new_v4().to_string(),
        wallet_id: body.wallet_id,
        name: body.name,
        principal: body.principal,
        currency: body.currency,
        monthly_payment: body.monthly_payment,
    };
    Ok(Json(state.debts.create(debt).await?))
}

async fn update_debt(State(state): State<Arc<AppState>>, Json(debt): Json<Debt>) -> ApiResult<Json<Debt>> {
    Ok(Json(state.debts.update(debt).await?))
}

async fn delete_debt(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.debts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewRecurringExpense {
    wallet_id: String,
    name: String,
    amount: rust_decimal::Decimal,
    currency: String,
    day_of_month: u32,
}

async fn list_recurring_expenses(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> ApiResult<Json<Vec<RecurringExpense>>> {
    Ok(Json(state.recurring_expenses.list_for_wallet(&wallet_id).await?))
}

async fn create_recurring_expense(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewRecurringExpense>,
) -> ApiResult<Json<RecurringExpense>> {
    let expense = RecurringExpense {
        id: Uuid::new_v4().to_string(),
        wallet_id: body.wallet_id,
        name: body.name,
        amount: body.amount,
        currency: body.currency,
        day_of_month: body.day_of_month,
    };
    Ok(Json(state.recurring_expenses.create(expense).await?))
}

async fn update_recurring_expense(
    State(state): State<Arc<AppState>>,
    Json(expense): Json<RecurringExpense>,
) -> ApiResult<Json<RecurringExpense>> {
    Ok(Json(state.recurring_expenses.update(expense).await?))
}

async fn delete_recurring_expense(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.recurring_expenses.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewYearGoal {
    wallet_id: String,
    year: i32,
    name: String,
    target_amount: rust_decimal::Decimal,
    currency: String,
    current_amount: rust_decimal::Decimal,
}

#[derive(Deserialize)]
struct YearQuery {
    year: i32,
}

async fn list_year_goals(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Query(q): Query<YearQuery>,
) -> ApiResult<Json<Vec<YearGoal>>> {
    Ok(Json(state.year_goals.list_for_wallet(&wallet_id, q.year).await?))
}

async fn create_year_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewYearGoal>,
) -> ApiResult<Json<YearGoal>> {
    let goal = YearGoal {
        id: Uuid::new_v4().to_string(),
        wallet_id: body.wallet_id,
        year: body.year,
        name: body.name,
        target_amount: body.target_amount,
        currency: body.currency,
        current_amount: body.current_amount,
    };
    Ok(Json(state.year_goals.create(goal).await?))
}

async fn update_year_goal(State(state): State<Arc<AppState>>, Json(goal): Json<YearGoal>) -> ApiResult<Json<YearGoal>> {
    Ok(Json(state.year_goals.update(goal).await?))
}

async fn delete_year_goal(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.year_goals.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct NewUserNote {
    body: String,
}

async fn list_user_notes(State(state): State<Arc<AppState>>, Path(user_id): Path<String>) -> ApiResult<Json<Vec<UserNote>>> {
    Ok(Json(state.user_notes.list_for_user(&user_id).await?))
}

async fn create_user_note(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<NewUserNote>,
) -> ApiResult<Json<UserNote>> {
    let note = UserNote { id: Uuid::new_v4().to_string(), user_id, body: body.body };
    Ok(Json(state.user_notes.create(note).await?))
}

async fn update_user_note(State(state): State<Arc<AppState>>, Json(note): Json<UserNote>) -> ApiResult<Json<UserNote>> {
    Ok(Json(state.user_notes.update(note).await?))
}

async fn delete_user_note(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.user_notes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet/{wallet_id}/debts", get(list_debts).post(create_debt))
        .route("/wallet/debts", axum::routing::put(update_debt))
        .route("/wallet/debts/{id}", axum::routing::delete(delete_debt))
        .route(
            "/wallet/{wallet_id}/recurring-expenses",
            get(list_recurring_expenses).post(create_recurring_expense),
        )
        .route("/wallet/recurring-expenses", axum::routing::put(update_recurring_expense))
        .route("/wallet/recurring-expenses/{id}", axum::routing::delete(delete_recurring_expense))
        .route("/wallet/{wallet_id}/year-goals", get(list_year_goals).post(create_year_goal))
        .route("/wallet/year-goals", axum::routing::put(update_year_goal))
        .route("/wallet/year-goals/{id}", axum::routing::delete(delete_year_goal))
        .route("/wallet/{user_id}/notes", get(list_user_notes).post(create_user_note))
        .route("/wallet/notes", axum::routing::put(update_user_note))
        .route("/wallet/notes/{id}", axum::routing::delete(delete_user_note))
}
