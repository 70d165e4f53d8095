use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// The caller's bearer token, attached to the request by [`require_session`].
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

/// Reject requests without `Authorization: Bearer <token>`.
///
/// The token itself is checked by the backend on first use: the store and
/// auth service answer 401 for expired or forged tokens.
pub async fn require_session(mut req: Request, next: Next) -> Response {
    match bearer_token(&req) {
        Some(token) => {
            req.extensions_mut().insert(AccessToken(token));
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "missing bearer token");
            ApiError::Unauthorized("Authentication required or session invalid".into())
                .into_response()
        }
    }
}

fn bearer_token(req: &Request) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}
