use contracts::dashboards::d104_sales_cycle::{SalesCycleFilters, SalesCycleView};
use contracts::shared::view::{DataTable, DropdownOption, KpiTone};

use crate::shared::aggregate;
use crate::shared::data::row_set::{DatePart, RowSet, MONTH_NAMES};
use crate::shared::data::tables::deal;
use crate::shared::filter::{self, date_part_options, dropdown_options, Criterion, IdentityScope};
use crate::shared::presentation::kpi;

pub const EXPORT_FILENAME: &str = "Sales_Cycle_Deals.csv";

const DEAL_COLUMNS: [(&str, &str); 5] = [
    (deal::OWNER, "Deal Owner Name"),
    (deal::NAME, "Deal Name"),
    (deal::SALES_CYCLE_DURATION, "Sales Cycle Duration"),
    (deal::STAGE, "Stage"),
    (deal::BILLING_COMPANY, "Billing Company"),
];

pub fn compute_view(deals: &RowSet, filters: &SalesCycleFilters) -> SalesCycleView {
    let unrestricted = IdentityScope::Unrestricted;
    let rows = filter::apply(
        deals,
        None,
        &unrestricted,
        &[
            Criterion::date_part(
                deal::CLOSING_DATE,
                DatePart::Year,
                filters.years.iter().map(|y| y.to_string()).collect(),
            ),
            Criterion::date_part(
                deal::CLOSING_DATE,
                DatePart::Month,
                filters.months.iter().map(|m| m.to_string()).collect(),
            ),
            Criterion::in_set(deal::OWNER, &filters.deal_owners),
            Criterion::in_set(deal::BILLING_COMPANY, &filters.billing_companies),
        ],
    );

    let average = aggregate::mean(&rows, deal::SALES_CYCLE_DURATION).unwrap_or(0.0);

    SalesCycleView {
        kpis: vec![kpi(
            "Average Sales Cycle",
            format!("{:.2} days", average),
            KpiTone::Neutral,
        )],
        deals: deal_table(&rows),
        year_options: date_part_options(deals, deal::CLOSING_DATE, DatePart::Year),
        month_options: month_options(),
        deal_owner_options: dropdown_options(deals, deal::OWNER, &unrestricted),
        billing_company_options: dropdown_options(deals, deal::BILLING_COMPANY, &unrestricted),
    }
}

/// Detail rows as displayed; missing cells are blank
fn deal_table(rows: &RowSet) -> DataTable {
    DataTable {
        columns: DEAL_COLUMNS.iter().map(|(_, header)| header.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| {
                DEAL_COLUMNS
                    .iter()
                    .map(|(column, _)| row.get(column).key().unwrap_or_default())
                    .collect()
            })
            .collect(),
        has_total_row: false,
    }
}

fn month_options() -> Vec<DropdownOption> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| DropdownOption {
            label: name.to_string(),
            value: (i + 1).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::row_set::{CellValue, Row};
    use chrono::NaiveDate;
    use maplit::hashmap;

    fn deal_row(owner: &str, company: &str, closing: Option<(i32, u32)>, duration: Option<f64>) -> Row {
        Row::new(hashmap! {
            deal::OWNER.to_string() => CellValue::Text(owner.into()),
            deal::NAME.to_string() => CellValue::Text(format!("{owner} deal")),
            deal::STAGE.to_string() => CellValue::Text("Discovery".into()),
            deal::BILLING_COMPANY.to_string() => CellValue::Text(company.into()),
            deal::CLOSING_DATE.to_string() => closing
                .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 15))
                .map(CellValue::Date)
                .unwrap_or(CellValue::Null),
            deal::SALES_CYCLE_DURATION.to_string() =>
                duration.map(CellValue::Number).unwrap_or(CellValue::Null),
        })
    }

    fn deals() -> RowSet {
        RowSet::new(
            vec![],
            vec![
                deal_row("Ann", "Valenta", Some((2024, 3)), Some(30.0)),
                deal_row("Bob", "Valenta", Some((2024, 4)), Some(45.0)),
                deal_row("Ann", "Other Co", Some((2023, 3)), None),
                deal_row("Cy", "Other Co", None, Some(10.0)),
            ],
        )
    }

    #[test]
    fn average_skips_missing_durations() {
        let view = compute_view(&deals(), &SalesCycleFilters::default());
        assert_eq!(view.kpis[0].value, "28.33 days");
        assert_eq!(view.deals.rows.len(), 4);
        assert_eq!(view.deals.rows[0], vec!["Ann", "Ann deal", "30", "Discovery", "Valenta"]);
        assert_eq!(view.deals.rows[2][2], "");
    }

    #[test]
    fn year_and_month_filters_drop_undated_deals() {
        let filters = SalesCycleFilters {
            years: vec![2023, 2024],
            months: vec![3],
            ..Default::default()
        };
        let view = compute_view(&deals(), &filters);
        assert_eq!(view.deals.rows.len(), 2);
        assert_eq!(view.kpis[0].value, "30.00 days");
    }

    #[test]
    fn empty_result_reports_zero_days() {
        let filters = SalesCycleFilters {
            billing_companies: vec!["Nobody".into()],
            ..Default::default()
        };
        let view = compute_view(&deals(), &filters);
        assert!(view.deals.is_empty());
        assert_eq!(view.kpis[0].value, "0.00 days");
        assert_eq!(view.month_options.len(), 12);
        assert_eq!(view.month_options[0].value, "1");
        let years: Vec<&str> = view.year_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(years, vec!["2023", "2024"]);
    }
}
