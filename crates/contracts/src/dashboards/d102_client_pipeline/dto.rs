use serde::{Deserialize, Serialize};

use crate::shared::view::{ClosingMonthWindow, DataTable, DropdownOption, KpiCard, StackedBarChart};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientPipelineFilters {
    pub deal_owners: Vec<String>,
    pub closing_months: Vec<ClosingMonthWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPipelineView {
    pub kpis: Vec<KpiCard>,
    /// Deals per stage with share of the pipeline and a trailing total
    pub stage_table: DataTable,
    pub owner_stage_chart: StackedBarChart,
    pub deal_owner_options: Vec<DropdownOption>,
    pub closing_month_options: Vec<DropdownOption>,
}
