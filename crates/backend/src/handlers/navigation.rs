use axum::{extract::State, Json};
use contracts::system::navigation::NavigationResponse;

use crate::dashboards::navigation::service;
use crate::shared::context::AppContext;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/navigation
pub async fn get_navigation(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
) -> Json<NavigationResponse> {
    Json(service::get_navigation(ctx.source.as_ref(), &principal).await)
}
