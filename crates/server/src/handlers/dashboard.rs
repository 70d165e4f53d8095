use axum::{
    extract::{Extension, Query, State},
    response::Json,
};
use chrono::Utc;
use finmate_core::models::{metrics::DashboardSummary, period::Period};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::middleware::AccessToken;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// `YYYY-MM`, defaults to the current month
    pub month: Option<String>,
    pub currency: Option<String>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let month = match query.month.as_deref() {
        Some(raw) => Period::parse_month(raw)?,
        None => Period::month_of(Utc::now().date_naive()),
    };
    let summary = state
        .finmate(&token)
        .dashboard(&month, query.currency.as_deref())
        .await?;
    Ok(Json(summary))
}
