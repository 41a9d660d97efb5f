use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::context::AppContext;
use crate::system::auth::extractor::CurrentUser;

/// Login handler
pub async fn login(
    State(ctx): State<AppContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let principal = ctx
        .verifier
        .verify(&request.username, &request.password)
        .ok_or_else(|| {
            tracing::warn!("Failed login attempt for '{}'", request.username.trim());
            StatusCode::UNAUTHORIZED
        })?;

    let access_token = ctx.tokens.issue(&principal).map_err(|e| {
        tracing::error!("Failed to issue token for {}: {}", principal.username, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("User {} logged in", principal.username);

    Ok(Json(LoginResponse {
        access_token,
        user: UserInfo::from(&principal),
    }))
}

/// Get current user info
pub async fn current_user(CurrentUser(principal): CurrentUser) -> Json<UserInfo> {
    Json(UserInfo::from(&principal))
}
