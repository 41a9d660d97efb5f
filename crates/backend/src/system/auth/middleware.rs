use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

use super::AuthError;
use crate::shared::context::AppContext;

fn bearer_claims(ctx: &AppContext, req: &Request<Body>) -> Result<TokenClaims, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    ctx.tokens
        .validate(token)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

fn reject(e: AuthError) -> StatusCode {
    tracing::warn!("Rejected request: {}", e);
    e.status()
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(
    State(ctx): State<AppContext>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = bearer_claims(&ctx, &req).map_err(reject)?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(
    State(ctx): State<AppContext>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = bearer_claims(&ctx, &req).map_err(reject)?;

    if !claims.is_admin {
        return Err(reject(AuthError::Forbidden));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
