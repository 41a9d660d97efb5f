use axum::{extract::State, http::StatusCode, response::Response, Json};
use contracts::dashboards::d101_entity_breakdown::{EntityBreakdownFilters, EntityBreakdownView};

use crate::dashboards::d101_entity_breakdown::service;
use crate::shared::context::AppContext;
use crate::shared::export::csv_download;
use crate::shared::filter::IdentityScope;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/d101/entity_breakdown
pub async fn get_entity_breakdown(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<EntityBreakdownFilters>,
) -> Json<EntityBreakdownView> {
    let scope = IdentityScope::for_principal(&principal);
    let view = service::compute_view(&ctx.invoices, &filters, &scope);
    tracing::info!(
        "D101 Entity Breakdown: {} entities for {}",
        view.table.rows.len().saturating_sub(1),
        principal.username
    );
    Json(view)
}

/// POST /api/d101/entity_breakdown/export
pub async fn export_entity_breakdown(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<EntityBreakdownFilters>,
) -> Result<Response, StatusCode> {
    let scope = IdentityScope::for_principal(&principal);
    let view = service::compute_view(&ctx.invoices, &filters, &scope);
    csv_download(service::EXPORT_FILENAME, &view.table)
}
