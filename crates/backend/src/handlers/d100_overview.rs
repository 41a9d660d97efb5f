use axum::{extract::State, http::StatusCode, response::Response, Json};
use contracts::dashboards::d100_overview::{OverviewFilters, OverviewView};

use crate::dashboards::d100_overview::service;
use crate::shared::context::AppContext;
use crate::shared::export::csv_download;
use crate::shared::filter::IdentityScope;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/d100/overview
pub async fn get_overview(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<OverviewFilters>,
) -> Json<OverviewView> {
    let scope = IdentityScope::for_principal(&principal);
    let view = service::compute_view(&ctx.invoices, &filters, &scope);
    tracing::info!(
        "D100 Overview: {} table rows for {}",
        view.table.rows.len(),
        principal.username
    );
    Json(view)
}

/// POST /api/d100/overview/export
pub async fn export_overview(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<OverviewFilters>,
) -> Result<Response, StatusCode> {
    let scope = IdentityScope::for_principal(&principal);
    let view = service::compute_view(&ctx.invoices, &filters, &scope);
    csv_download(service::EXPORT_FILENAME, &view.table)
}
