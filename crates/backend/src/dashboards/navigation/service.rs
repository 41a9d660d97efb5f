use contracts::dashboards::d105_commission_detail::CommissionSectionId;
use contracts::system::navigation::{NavLink, NavigationResponse};

use crate::dashboards::d105_commission_detail::repository::{self, OPTION_VALUE};
use crate::shared::data::source::DataSource;
use crate::shared::filter::{dropdown_options, IdentityScope};
use crate::system::auth::Principal;

/// Sidebar order: (id, title, path)
const PAGES: [(&str, &str, &str); 7] = [
    ("overview", "Overview", "/overview"),
    ("entity", "Entity Breakdown", "/entity"),
    ("client", "Deals in Client Pipeline", "/client"),
    ("franchise", "Deals in Franchise Pipeline", "/franchise"),
    ("sales_cycle", "Sales Cycle", "/sales_cycle"),
    ("commission_details", "Commission Details", "/commission_details"),
    ("commission_overview", "Commission Overview", "/commission_overview"),
];

/// Pages the principal may open. `in_commission_lists` tells whether a non-admin
/// principal is one of the commission dropdown values.
pub fn pages_for(principal: &Principal, in_commission_lists: bool) -> NavigationResponse {
    let pages = PAGES
        .iter()
        .filter(|(id, _, _)| match *id {
            "commission_details" => principal.is_admin || in_commission_lists,
            "commission_overview" => principal.is_admin,
            _ => true,
        })
        .map(|(id, title, path)| NavLink {
            id: id.to_string(),
            title: title.to_string(),
            path: path.to_string(),
        })
        .collect();
    NavigationResponse { pages }
}

/// Whether `principal` appears in any commission section's option list
pub async fn appears_in_commission_lists(source: &dyn DataSource, principal: &Principal) -> bool {
    let scope = IdentityScope::for_principal(principal);
    for id in CommissionSectionId::ALL {
        let spec = repository::section_spec(id);
        let options = repository::load_option_values(source, &spec).await;
        if !dropdown_options(&options, OPTION_VALUE, &scope).is_empty() {
            return true;
        }
    }
    false
}

pub async fn get_navigation(source: &dyn DataSource, principal: &Principal) -> NavigationResponse {
    let listed = !principal.is_admin && appears_in_commission_lists(source, principal).await;
    tracing::debug!(
        "Navigation for {}: admin={}, commission lists={}",
        principal.username,
        principal.is_admin,
        listed
    );
    pages_for(principal, listed)
}
