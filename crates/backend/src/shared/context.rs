use std::sync::Arc;

use super::config::Config;
use super::data::row_set::RowSet;
use super::data::source::DataSource;
use super::data::tables;
use crate::system::auth::jwt::TokenIssuer;
use crate::system::auth::verifier::IdentityVerifier;

/// Shared state handed to every handler. Preloaded tables are read-only.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub source: Arc<dyn DataSource>,
    pub invoices: Arc<RowSet>,
    pub deals: Arc<RowSet>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub tokens: TokenIssuer,
}

impl AppContext {
    /// Builds the context and preloads the invoice and deal tables
    pub async fn load(
        config: Config,
        source: Arc<dyn DataSource>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let invoices =
            tables::load_invoices(source.as_ref(), config.dashboard.min_invoice_year).await;
        let deals = tables::load_deals(source.as_ref()).await;
        let tokens = TokenIssuer::from_config(&config.auth);

        Self {
            config: Arc::new(config),
            source,
            invoices: Arc::new(invoices),
            deals: Arc::new(deals),
            verifier,
            tokens,
        }
    }
}
