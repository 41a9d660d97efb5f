use contracts::dashboards::d106_commission_overview::CommissionOverviewView;
use contracts::shared::view::{ChartKind, KpiTone};

use super::repository::{self, INVOICE_AMOUNT, INVOICE_DATE, PAID_SOURCES};
use crate::shared::aggregate::{combined_total, Grouping};
use crate::shared::data::row_set::{DatePart, RowSet};
use crate::shared::data::source::DataSource;
use crate::shared::format::format_currency;
use crate::shared::presentation::{kpi, summary_series};

/// `paid_sums` follow `PAID_SOURCES`; missing trailing sums count as zero
pub fn compute_view(paid_sums: &[f64], practice_mp: &RowSet) -> CommissionOverviewView {
    let kpis = PAID_SOURCES
        .iter()
        .enumerate()
        .map(|(i, (title, _, _))| {
            let value = paid_sums.get(i).copied();
            kpi(title, format_currency(value), KpiTone::Positive)
        })
        .collect();

    let by_month = Grouping::by_date_part(INVOICE_DATE, DatePart::YearMonth)
        .sum(INVOICE_AMOUNT)
        .summarize(practice_mp);

    CommissionOverviewView {
        kpis,
        total: kpi(
            "Total Commission Paid",
            format_currency(Some(combined_total(paid_sums))),
            KpiTone::Positive,
        ),
        practice_mp_by_month: summary_series(
            "Practice MP by Month",
            ChartKind::Bar,
            &by_month,
            INVOICE_AMOUNT,
        ),
    }
}

pub async fn get_commission_overview(source: &dyn DataSource) -> CommissionOverviewView {
    let sums = repository::load_paid_sums(source).await;
    let practice_mp = repository::load_practice_mp_invoices(source).await;
    compute_view(&sums, &practice_mp)
}
