use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use finmate_core::models::{
    forex::{ForexOperation, ForexSummary, NewForexOperation},
    transaction::{NewTransaction, Transaction},
    transfer::{NewTransfer, Transfer},
    wallet::{TransferFees, WalletBalance},
};

use crate::error::ApiResult;
use crate::middleware::AccessToken;
use crate::AppState;

// ── Transactions ────────────────────────────────────────────────────

pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.finmate(&token).list_transactions().await?))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let record = state.finmate(&token).add_transaction(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ── Forex ───────────────────────────────────────────────────────────

pub async fn list_forex(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<ForexOperation>>> {
    Ok(Json(state.finmate(&token).list_forex().await?))
}

pub async fn create_forex(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Json(payload): Json<NewForexOperation>,
) -> ApiResult<(StatusCode, Json<ForexOperation>)> {
    let record = state.finmate(&token).add_forex(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn forex_summary(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<ForexSummary>>> {
    Ok(Json(state.finmate(&token).forex_summary().await?))
}

// ── Transfers & Wallets ─────────────────────────────────────────────

pub async fn list_transfers(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<Transfer>>> {
    Ok(Json(state.finmate(&token).list_transfers().await?))
}

pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Json(payload): Json<NewTransfer>,
) -> ApiResult<(StatusCode, Json<Transfer>)> {
    let record = state.finmate(&token).add_transfer(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn wallet_balances(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<WalletBalance>>> {
    Ok(Json(state.finmate(&token).wallet_balances().await?))
}

pub async fn transfer_fees(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<TransferFees>>> {
    Ok(Json(state.finmate(&token).transfer_fees().await?))
}
