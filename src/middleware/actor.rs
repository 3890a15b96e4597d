use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{decode_jwt, Actor};
use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the optional caller identity from `Authorization: Bearer <jwt>`
/// and stores it as an [`Actor`] request extension. No header means an
/// anonymous call; a header that does not verify is rejected.
pub async fn resolve_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = extract_bearer_token(request.headers())? {
        let claims = decode_jwt(&token, &state.config.security.jwt_secret)?;
        let actor = Actor::from(claims);
        tracing::debug!(actor_id = actor.id, "Resolved actor");
        request.extensions_mut().insert(actor);
    }

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        Some(_) => Err(ApiError::unauthorized("Empty JWT token")),
        None => Err(ApiError::unauthorized("Authorization header must use Bearer token format")),
    }
}
