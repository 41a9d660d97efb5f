use contracts::shared::view::{ClosingMonthWindow, DropdownOption};
use std::collections::BTreeSet;

use super::scope::IdentityScope;
use crate::shared::data::row_set::{DatePart, RowSet};

/// Distinct non-empty values of `column`, sorted.
///
/// A restricted scope yields at most the principal's own value.
pub fn dropdown_options(rows: &RowSet, column: &str, scope: &IdentityScope) -> Vec<DropdownOption> {
    let values: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.get(column).key())
        .filter(|v| !v.trim().is_empty())
        .filter(|v| scope.permits(Some(v.as_str())))
        .collect();
    values.into_iter().map(DropdownOption::plain).collect()
}

/// Distinct date components of `column` in chronological order
pub fn date_part_options(rows: &RowSet, column: &str, part: DatePart) -> Vec<DropdownOption> {
    let values: BTreeSet<(i64, String)> = rows
        .iter()
        .filter_map(|row| row.date(column))
        .map(|date| (part.sort_index(date), part.extract(date)))
        .collect();
    values
        .into_iter()
        .map(|(_, value)| DropdownOption::plain(value))
        .collect()
}

pub fn window_options() -> Vec<DropdownOption> {
    ClosingMonthWindow::ALL
        .iter()
        .map(|w| DropdownOption {
            label: w.label().to_string(),
            value: w.value().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::row_set::{CellValue, Row};
    use chrono::NaiveDate;
    use maplit::hashmap;

    fn rows() -> RowSet {
        let row = |location: CellValue, y: i32, m: u32| {
            Row::new(hashmap! {
                "location".to_string() => location,
                "invoice_date".to_string() => CellValue::Date(NaiveDate::from_ymd_opt(y, m, 1).unwrap()),
            })
        };
        RowSet::new(
            vec!["location".into(), "invoice_date".into()],
            vec![
                row(CellValue::Text("NYC".into()), 2024, 11),
                row(CellValue::Text("LA".into()), 2023, 2),
                row(CellValue::Text("NYC".into()), 2024, 2),
                row(CellValue::Text("".into()), 2022, 9),
                row(CellValue::Null, 2024, 1),
            ],
        )
    }

    fn values(options: Vec<DropdownOption>) -> Vec<String> {
        options.into_iter().map(|o| o.value).collect()
    }

    #[test]
    fn options_are_distinct_sorted_and_scoped() {
        assert_eq!(
            values(dropdown_options(&rows(), "location", &IdentityScope::Unrestricted)),
            vec!["LA", "NYC"]
        );
        assert_eq!(
            values(dropdown_options(
                &rows(),
                "location",
                &IdentityScope::Restricted("NYC".into())
            )),
            vec!["NYC"]
        );
        assert!(dropdown_options(&rows(), "location", &IdentityScope::Restricted("SF".into()))
            .is_empty());
    }

    #[test]
    fn month_names_follow_the_calendar() {
        assert_eq!(
            values(date_part_options(&rows(), "invoice_date", DatePart::MonthName)),
            vec!["January", "February", "September", "November"]
        );
        assert_eq!(
            values(date_part_options(&rows(), "invoice_date", DatePart::Year)),
            vec!["2022", "2023", "2024"]
        );
    }
}
