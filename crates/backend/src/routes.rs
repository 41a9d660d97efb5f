use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::shared::context::AppContext;
use crate::system::auth::middleware::{require_admin, require_auth};
use crate::{handlers, system};

/// All application routes, with `ctx` as shared state
pub fn configure_routes(ctx: AppContext) -> Router {
    let auth = || middleware::from_fn_with_state(ctx.clone(), require_auth);
    let admin = || middleware::from_fn_with_state(ctx.clone(), require_admin);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES
        // ========================================
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).layer(auth()),
        )
        .route(
            "/api/navigation",
            get(handlers::navigation::get_navigation).layer(auth()),
        )
        // ========================================
        // INVOICE DASHBOARDS
        // ========================================
        .route(
            "/api/d100/overview",
            post(handlers::d100_overview::get_overview).layer(auth()),
        )
        .route(
            "/api/d100/overview/export",
            post(handlers::d100_overview::export_overview).layer(auth()),
        )
        .route(
            "/api/d101/entity_breakdown",
            post(handlers::d101_entity_breakdown::get_entity_breakdown).layer(auth()),
        )
        .route(
            "/api/d101/entity_breakdown/export",
            post(handlers::d101_entity_breakdown::export_entity_breakdown).layer(auth()),
        )
        // ========================================
        // DEAL DASHBOARDS
        // ========================================
        .route(
            "/api/d102/client_pipeline",
            post(handlers::d102_client_pipeline::get_client_pipeline).layer(auth()),
        )
        .route(
            "/api/d103/franchise_pipeline",
            post(handlers::d103_franchise_pipeline::get_franchise_pipeline).layer(auth()),
        )
        .route(
            "/api/d104/sales_cycle",
            post(handlers::d104_sales_cycle::get_sales_cycle).layer(auth()),
        )
        .route(
            "/api/d104/sales_cycle/export",
            post(handlers::d104_sales_cycle::export_sales_cycle).layer(auth()),
        )
        // ========================================
        // COMMISSION DASHBOARDS
        // ========================================
        .route(
            "/api/d105/commission_detail",
            post(handlers::d105_commission_detail::get_commission_detail).layer(auth()),
        )
        .route(
            "/api/d105/commission_detail/export/:section",
            post(handlers::d105_commission_detail::export_section).layer(auth()),
        )
        .route(
            "/api/d106/commission_overview",
            get(handlers::d106_commission_overview::get_commission_overview).layer(admin()),
        )
        .with_state(ctx)
}
