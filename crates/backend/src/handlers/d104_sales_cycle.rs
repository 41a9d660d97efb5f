use axum::{extract::State, http::StatusCode, response::Response, Json};
use contracts::dashboards::d104_sales_cycle::{SalesCycleFilters, SalesCycleView};

use crate::dashboards::d104_sales_cycle::service;
use crate::shared::context::AppContext;
use crate::shared::export::csv_download;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/d104/sales_cycle
pub async fn get_sales_cycle(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<SalesCycleFilters>,
) -> Json<SalesCycleView> {
    let view = service::compute_view(&ctx.deals, &filters);
    tracing::info!(
        "D104 Sales Cycle: {} deals for {}",
        view.deals.rows.len(),
        principal.username
    );
    Json(view)
}

/// POST /api/d104/sales_cycle/export
pub async fn export_sales_cycle(
    State(ctx): State<AppContext>,
    Json(filters): Json<SalesCycleFilters>,
) -> Result<Response, StatusCode> {
    let view = service::compute_view(&ctx.deals, &filters);
    csv_download(service::EXPORT_FILENAME, &view.deals)
}
