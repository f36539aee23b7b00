use crate::auth::jwt::TokenIssuer;
use crate::types::{AppError, Claims};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Rejects requests without a valid, unexpired bearer token and stores the
/// verified [`Claims`] in the request extensions.
pub async fn auth_middleware(
    State(issuer): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::InvalidToken("missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::InvalidToken("expected a Bearer token".to_string()))?;

    let claims = issuer.verify_token(token.trim())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extractor for the claims placed by [`auth_middleware`].
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::InvalidToken("request was not authenticated".to_string()))
    }
}
