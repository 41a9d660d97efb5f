use contracts::dashboards::d101_entity_breakdown::{EntityBreakdownFilters, EntityBreakdownView};
use contracts::shared::view::{ChartKind, KpiTone};

use crate::shared::aggregate::{self, percent_of, Grouping};
use crate::shared::data::row_set::{DatePart, RowSet};
use crate::shared::data::tables::invoice;
use crate::shared::filter::{self, date_part_options, Criterion, IdentityScope};
use crate::shared::format::{format_amount, format_currency, format_percent};
use crate::shared::presentation::{kpi, summary_series, summary_table, SummaryColumn};

pub const EXPORT_FILENAME: &str = "entity_breakdown.csv";

pub const SCOPE_COLUMN: &str = invoice::LOCATION;

const PAID: &str = "paid_amount";

pub fn compute_view(
    invoices: &RowSet,
    filters: &EntityBreakdownFilters,
    scope: &IdentityScope,
) -> EntityBreakdownView {
    let scoped = filter::apply(invoices, Some(SCOPE_COLUMN), scope, &[]);
    let rows = filter::apply(
        &scoped,
        None,
        &IdentityScope::Unrestricted,
        &[
            Criterion::date_part(invoice::DATE, DatePart::Year, filters.years.clone()),
            Criterion::date_part(invoice::DATE, DatePart::Quarter, filters.quarters.clone()),
            Criterion::date_part(invoice::DATE, DatePart::MonthName, filters.months.clone()),
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
            format_percent(percent_of(paid, invoice_total), 2),
            KpiTone::Positive,
        ),
        kpi("Receivables", format_currency(Some(receivables)), KpiTone::Negative),
        kpi(
            "Receivables %",
            format_percent(percent_of(receivables, invoice_total), 2),
            KpiTone::Negative,
        ),
    ];

    let by_entity = Grouping::by_column(invoice::ENTITY)
        .sum(invoice::AMOUNT_USD)
        .sum(invoice::OUTSTANDING)
        .summarize(&rows)
        .derive(PAID, |g| g.get(invoice::AMOUNT_USD) - g.get(invoice::OUTSTANDING))
        .with_total();

    let table = summary_table(
        "Invoice Entity",
        &by_entity,
        &[
            SummaryColumn::new("Invoice Amount", |g| format_amount(g.get(invoice::AMOUNT_USD))),
            SummaryColumn::new("Paid Amount", |g| format_amount(g.get(PAID))),
            SummaryColumn::new("Paid %", |g| {
                format_percent(percent_of(g.get(PAID), g.get(invoice::AMOUNT_USD)), 2)
            }),
            SummaryColumn::new("Receivables", |g| format_amount(g.get(invoice::OUTSTANDING))),
            SummaryColumn::new("Receivables %", |g| {
                format_percent(
                    percent_of(g.get(invoice::OUTSTANDING), g.get(invoice::AMOUNT_USD)),
                    2,
                )
            }),
        ],
    );

    let by_year = Grouping::by_date_part(invoice::DATE, DatePart::Year)
        .sum(invoice::AMOUNT_USD)
        .sum(invoice::OUTSTANDING)
        .summarize(&rows);

    EntityBreakdownView {
        kpis,
        table,
        by_year: vec![
            summary_series("Invoice Amount", ChartKind::Bar, &by_year, invoice::AMOUNT_USD),
            summary_series("Receivables", ChartKind::Line, &by_year, invoice::OUTSTANDING),
        ],
        year_options: date_part_options(&scoped, invoice::DATE, DatePart::Year),
        quarter_options: date_part_options(&scoped, invoice::DATE, DatePart::Quarter),
        month_options: date_part_options(&scoped, invoice::DATE, DatePart::MonthName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::row_set::{CellValue, Row};
    use chrono::NaiveDate;
    use maplit::hashmap;
    use pretty_assertions::assert_eq;

    fn invoice_row(entity: Option<&str>, ymd: (i32, u32, u32), amount: f64, outstanding: f64) -> Row {
        Row::new(hashmap! {
            invoice::LOCATION.to_string() => CellValue::Text("NYC".into()),
            invoice::ENTITY.to_string() => entity
                .map(|e| CellValue::Text(e.into()))
                .unwrap_or(CellValue::Null),
            invoice::DATE.to_string() =>
                CellValue::Date(NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap()),
            invoice::AMOUNT_USD.to_string() => CellValue::Number(amount),
            invoice::OUTSTANDING.to_string() => CellValue::Number(outstanding),
        })
    }

    fn invoices() -> RowSet {
        RowSet::new(
            vec![],
            vec![
                invoice_row(Some("Valenta US"), (2024, 2, 1), 1000.0, 100.0),
                invoice_row(Some("Valenta UK"), (2024, 8, 1), 5000.0, 2500.0),
                invoice_row(None, (2023, 11, 1), 200.0, 0.0),
            ],
        )
    }

    #[test]
    fn groups_by_entity_with_two_decimal_percentages() {
        let view = compute_view(
            &invoices(),
            &EntityBreakdownFilters::default(),
            &IdentityScope::Unrestricted,
        );

        let kpis: Vec<&str> = view.kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(kpis, vec!["$6,200", "$3,600", "58.06%", "$2,600", "41.94%"]);

        let entities: Vec<&str> = view.table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(entities, vec!["Unknown", "Valenta UK", "Valenta US", "Total"]);
        assert_eq!(
            view.table.rows[3],
            vec!["Total", "6,200", "3,600", "58.06%", "2,600", "41.94%"]
        );
        assert_eq!(view.by_year.len(), 2);
        assert_eq!(view.by_year[1].values, vec![0.0, 2600.0]);
    }

    #[test]
    fn quarter_filter() {
        let filters = EntityBreakdownFilters {
            quarters: vec!["Q3".into()],
            ..Default::default()
        };
        let view = compute_view(&invoices(), &filters, &IdentityScope::Unrestricted);
        assert_eq!(view.kpis[0].value, "$5,000");
        assert_eq!(view.kpis[2].value, "50.00%");

        let quarters: Vec<&str> = view.quarter_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(quarters, vec!["Q1", "Q3", "Q4"]);
    }
}
