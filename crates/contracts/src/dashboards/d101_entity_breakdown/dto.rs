use serde::{Deserialize, Serialize};

use crate::shared::view::{ChartSeries, DataTable, DropdownOption, KpiCard};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityBreakdownFilters {
    pub years: Vec<String>,
    /// "Q1".."Q4"
    pub quarters: Vec<String>,
    pub months: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityBreakdownView {
    pub kpis: Vec<KpiCard>,
    pub table: DataTable,
    /// Invoice amount bars and receivables line, both keyed by year
    pub by_year: Vec<ChartSeries>,
    pub year_options: Vec<DropdownOption>,
    pub quarter_options: Vec<DropdownOption>,
    pub month_options: Vec<DropdownOption>,
}
