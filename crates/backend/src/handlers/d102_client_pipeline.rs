use axum::{extract::State, Json};
use chrono::Local;
use contracts::dashboards::d102_client_pipeline::{ClientPipelineFilters, ClientPipelineView};

use crate::dashboards::d102_client_pipeline::service;
use crate::shared::context::AppContext;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/d102/client_pipeline
pub async fn get_client_pipeline(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<ClientPipelineFilters>,
) -> Json<ClientPipelineView> {
    let today = Local::now().date_naive();
    let view = service::compute_view(&ctx.deals, &filters, today);
    tracing::info!(
        "D102 Client Pipeline: {} stages for {}",
        view.stage_table.rows.len().saturating_sub(1),
        principal.username
    );
    Json(view)
}
