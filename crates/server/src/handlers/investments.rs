use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use finmate_core::models::{
    investment::{InvestmentOperation, NewInvestment},
    position::{ClosedPosition, PortfolioSummary, PositionValuation},
};

use crate::error::ApiResult;
use crate::middleware::AccessToken;
use crate::AppState;

pub async fn list_investments(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<InvestmentOperation>>> {
    Ok(Json(state.finmate(&token).list_investments().await?))
}

pub async fn create_investment(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Json(payload): Json<NewInvestment>,
) -> ApiResult<(StatusCode, Json<InvestmentOperation>)> {
    let record = state.finmate(&token).add_investment(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Open positions with current market value where a live price exists.
pub async fn open_positions(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<PositionValuation>>> {
    Ok(Json(state.finmate(&token).open_positions().await?))
}

pub async fn closed_positions(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<ClosedPosition>>> {
    Ok(Json(state.finmate(&token).closed_positions().await?))
}

pub async fn portfolio_summary(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<Vec<PortfolioSummary>>> {
    Ok(Json(state.finmate(&token).portfolio_summary().await?))
}
