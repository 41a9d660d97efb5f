use serde::{Deserialize, Serialize};

use crate::shared::view::{ChartSeries, DataTable, DropdownOption, KpiCard};

/// Dropdown selections of the overview page; empty vectors mean "no filter"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewFilters {
    /// Invoice years, e.g. ["2024"]
    pub years: Vec<String>,
    /// Month names, e.g. ["January"]
    pub months: Vec<String>,
    pub entities: Vec<String>,
    /// MP codes (invoice location)
    pub mp_codes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewView {
    pub kpis: Vec<KpiCard>,
    /// Per MP code summary with trailing total
    pub table: DataTable,
    pub invoice_by_year: ChartSeries,
    /// Paid vs receivables split
    pub invoice_breakdown: ChartSeries,
    pub year_options: Vec<DropdownOption>,
    pub month_options: Vec<DropdownOption>,
    pub entity_options: Vec<DropdownOption>,
    pub mp_code_options: Vec<DropdownOption>,
}
