use axum::{extract::State, Json};
use contracts::dashboards::d106_commission_overview::CommissionOverviewView;

use crate::dashboards::d106_commission_overview::service;
use crate::shared::context::AppContext;

/// GET /api/d106/commission_overview (admin only)
pub async fn get_commission_overview(State(ctx): State<AppContext>) -> Json<CommissionOverviewView> {
    let view = service::get_commission_overview(ctx.source.as_ref()).await;
    tracing::info!("D106 Commission Overview: total {}", view.total.value);
    Json(view)
}
