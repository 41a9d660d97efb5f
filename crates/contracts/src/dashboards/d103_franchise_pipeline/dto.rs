use serde::{Deserialize, Serialize};

use crate::shared::view::{ClosingMonthWindow, DataTable, DropdownOption, KpiCard, StackedBarChart};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FranchisePipelineFilters {
    pub deal_owners: Vec<String>,
    pub closing_months: Vec<ClosingMonthWindow>,
    /// Regions; a selection containing "All" does not filter
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FranchisePipelineView {
    pub kpis: Vec<KpiCard>,
    pub stage_table: DataTable,
    pub owner_stage_chart: StackedBarChart,
    pub deal_owner_options: Vec<DropdownOption>,
    pub closing_month_options: Vec<DropdownOption>,
    pub region_options: Vec<DropdownOption>,
}
