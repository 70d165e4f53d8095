use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use finmate_core::store::auth::{AuthUser, Session};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AccessToken;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<Session>> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }
    match state.auth.sign_in(email, &payload.password).await {
        Ok(session) => Ok(Json(session)),
        Err(e) => {
            tracing::info!(error = %e, "login rejected");
            Err(e.into())
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<StatusCode> {
    state.auth.sign_out(&token.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> ApiResult<Json<AuthUser>> {
    Ok(Json(state.auth.get_user(&token.0).await?))
}
