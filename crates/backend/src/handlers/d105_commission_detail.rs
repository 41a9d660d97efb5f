use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use contracts::dashboards::d105_commission_detail::{
    CommissionDetailFilters, CommissionDetailView, CommissionSectionId,
};

use crate::dashboards::d105_commission_detail::service;
use crate::shared::context::AppContext;
use crate::shared::export::csv_download;
use crate::shared::filter::IdentityScope;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/d105/commission_detail
pub async fn get_commission_detail(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Json(filters): Json<CommissionDetailFilters>,
) -> Json<CommissionDetailView> {
    tracing::info!(
        "D105 Commission Detail: {:?}-{:?} for {}",
        filters.year,
        filters.month,
        principal.username
    );
    let scope = IdentityScope::for_principal(&principal);
    let view = service::get_commission_detail(ctx.source.as_ref(), &filters, &scope).await;
    Json(view)
}

/// POST /api/d105/commission_detail/export/:section
pub async fn export_section(
    State(ctx): State<AppContext>,
    CurrentUser(principal): CurrentUser,
    Path(section): Path<CommissionSectionId>,
    Json(filters): Json<CommissionDetailFilters>,
) -> Result<Response, StatusCode> {
    let scope = IdentityScope::for_principal(&principal);
    let table = service::get_section_table(ctx.source.as_ref(), &filters, &scope, section).await;
    csv_download(&service::export_filename(section), &table)
}
