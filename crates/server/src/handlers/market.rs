use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::NaiveDate;
use finmate_core::models::quote::{ExchangeListing, Market, PricePoint, Quote};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Shown when the client does not ask for specific coins.
const DEFAULT_CRYPTO: [&str; 3] = ["BTC", "ETH", "USDT"];

#[derive(Debug, Deserialize)]
pub struct SymbolsQuery {
    pub symbols: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub symbol: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Split `"btc, eth,,sol"` into `["BTC", "ETH", "SOL"]`, dropping duplicates.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for s in raw.split(',').map(|s| s.trim().to_uppercase()) {
        if !s.is_empty() && !symbols.contains(&s) {
            symbols.push(s);
        }
    }
    symbols
}

pub async fn crypto_prices(
    State(state): State<AppState>,
    Query(query): Query<SymbolsQuery>,
) -> Json<Vec<Quote>> {
    let symbols = match query.symbols.as_deref().map(parse_symbols) {
        Some(list) if !list.is_empty() => list,
        _ => DEFAULT_CRYPTO.iter().map(|s| s.to_string()).collect(),
    };
    Json(state.market.quotes(Market::Crypto, &symbols).await)
}

pub async fn stock_quote(
    State(state): State<AppState>,
    Query(query): Query<SymbolQuery>,
) -> ApiResult<Json<Quote>> {
    let quote = state.market.quote(Market::Stock, &query.symbol).await?;
    Ok(Json(quote))
}

pub async fn stock_quotes(
    State(state): State<AppState>,
    Query(query): Query<SymbolsQuery>,
) -> ApiResult<Json<Vec<Quote>>> {
    let symbols = query.symbols.as_deref().map(parse_symbols).unwrap_or_default();
    if symbols.is_empty() {
        return Err(ApiError::bad_request("'symbols' must list at least one ticker"));
    }
    Ok(Json(state.market.quotes(Market::Stock, &symbols).await))
}

pub async fn stock_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<PricePoint>>> {
    let points = state
        .market
        .price_history(Market::Stock, &query.symbol, query.from, query.to)
        .await?;
    Ok(Json(points))
}

/// Regional exchange listing. Never fails: the last resort is mock data.
pub async fn exchange_quotes(State(state): State<AppState>) -> Json<ExchangeListing> {
    Json(state.market.exchange_rates().await)
}
