use contracts::dashboards::d100_overview::{OverviewFilters, OverviewView};
use contracts::shared::view::{ChartKind, DataTable, KpiTone};

use crate::shared::aggregate::{self, percent_of, Grouping, Summary};
use crate::shared::data::row_set::{DatePart, RowSet};
use crate::shared::data::tables::invoice;
use crate::shared::filter::{self, date_part_options, dropdown_options, Criterion, IdentityScope};
use crate::shared::format::{format_currency, format_percent};
use crate::shared::presentation::{kpi, series, summary_series, summary_table, SummaryColumn};

pub const EXPORT_FILENAME: &str = "overview_report.csv";

/// Invoice rows are restricted to the principal's MP code
pub const SCOPE_COLUMN: &str = invoice::LOCATION;

const PAID: &str = "paid_amount";

pub fn compute_view(invoices: &RowSet, filters: &OverviewFilters, scope: &IdentityScope) -> OverviewView {
    let scoped = filter::apply(invoices, Some(SCOPE_COLUMN), scope, &[]);
    let rows = filter::apply(
        &scoped,
        None,
        &IdentityScope::Unrestricted,
        &[
            Criterion::date_part(invoice::DATE, DatePart::Year, filters.years.clone()),
            Criterion::date_part(invoice::DATE, DatePart::MonthName, filters.months.clone()),
            Criterion::in_set(invoice::ENTITY, &filters.entities),
            Criterion::in_set(invoice::LOCATION, &filters.mp_codes),
        ],
    );

    let invoice_total = aggregate::sum(&rows, invoice::AMOUNT_USD);
    let receivables = aggregate::sum(&rows, invoice::OUTSTANDING);
    let paid = invoice_total - receivables;

    let kpis = vec![
        kpi("Invoice Amount", format_currency(Some(invoice_total)), KpiTone::Positive),
        kpi("Paid Amount", format_currency(Some(paid)), KpiTone::Positive),
        kpi(
            "Paid %",
            format_percent(percent_of(paid, invoice_total), 0),
            KpiTone::Positive,
        ),
        kpi("Receivables", format_currency(Some(receivables)), KpiTone::Negative),
        kpi(
            "Receivables %",
            format_percent(percent_of(receivables, invoice_total), 2),
            KpiTone::Negative,
        ),
    ];

    let by_mp = Grouping::by_column(invoice::LOCATION)
        .sum(invoice::AMOUNT_USD)
        .sum(invoice::OUTSTANDING)
        .summarize(&rows)
        .derive(PAID, |g| g.get(invoice::AMOUNT_USD) - g.get(invoice::OUTSTANDING))
        .with_total();

    let by_year = Grouping::by_date_part(invoice::DATE, DatePart::Year)
        .sum(invoice::AMOUNT_USD)
        .summarize(&rows);

    OverviewView {
        kpis,
        table: mp_table(&by_mp),
        invoice_by_year: summary_series("Invoice Amount", ChartKind::Line, &by_year, invoice::AMOUNT_USD),
        invoice_breakdown: series(
            "Invoice Breakdown",
            ChartKind::Donut,
            vec!["Paid Amount".to_string(), "Receivables".to_string()],
            vec![paid, receivables],
        ),
        year_options: date_part_options(&scoped, invoice::DATE, DatePart::Year),
        month_options: date_part_options(&scoped, invoice::DATE, DatePart::MonthName),
        entity_options: dropdown_options(&scoped, invoice::ENTITY, &IdentityScope::Unrestricted),
        mp_code_options: dropdown_options(&scoped, invoice::LOCATION, scope),
    }
}

/// Per MP code amounts; percentages of each row are taken from that row's own totals
fn mp_table(summary: &Summary) -> DataTable {
    summary_table(
        "MP Code",
        summary,
        &[
            SummaryColumn::new("Invoice Amount", |g| {
                format_currency(Some(g.get(invoice::AMOUNT_USD)))
            }),
            SummaryColumn::new("Paid Amount", |g| format_currency(Some(g.get(PAID)))),
            SummaryColumn::new("Paid %", |g| {
                format_percent(percent_of(g.get(PAID), g.get(invoice::AMOUNT_USD)), 0)
            }),
            SummaryColumn::new("Receivables", |g| {
                format_currency(Some(g.get(invoice::OUTSTANDING)))
            }),
            SummaryColumn::new("Receivables %", |g| {
                format_percent(
                    percent_of(g.get(invoice::OUTSTANDING), g.get(invoice::AMOUNT_USD)),
                    2,
                )
            }),
        ],
    )
}
