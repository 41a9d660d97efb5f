use serde::{Deserialize, Serialize};

use crate::shared::view::{DataTable, DropdownOption, KpiCard};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesCycleFilters {
    /// Closing years
    pub years: Vec<i32>,
    /// Closing months, 1..=12
    pub months: Vec<u32>,
    pub deal_owners: Vec<String>,
    pub billing_companies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesCycleView {
    pub kpis: Vec<KpiCard>,
    pub deals: DataTable,
    pub year_options: Vec<DropdownOption>,
    pub month_options: Vec<DropdownOption>,
    pub deal_owner_options: Vec<DropdownOption>,
    pub billing_company_options: Vec<DropdownOption>,
}
