use serde::{Deserialize, Serialize};

use crate::shared::view::{ChartSeries, KpiCard};

/// Paid commission totals across all commission tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionOverviewView {
    pub kpis: Vec<KpiCard>,
    pub total: KpiCard,
    pub practice_mp_by_month: ChartSeries,
}
