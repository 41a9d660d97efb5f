use axum::{extract::State, Json};
use chrono::Local;
use contracts::dashboards::d103_franchise_pipeline::{FranchisePipelineFilters, FranchisePipelineView};

use crate::dashboards::d103_franchise_pipeline::service;
use crate::shared::context::AppContext;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/d103/franchise_pipeline
pub async fn get_franchise_pipeline(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<FranchisePipelineFilters>,
) -> Json<FranchisePipelineView> {
    let today = Local::now().date_naive();
    let view = service::compute_view(&ctx.deals, &filters, today);
    tracing::info!(
        "D103 Franchise Pipeline: {} stages for {}",
        view.stage_table.rows.len().saturating_sub(1),
        principal.username
    );
    Json(view)
}
