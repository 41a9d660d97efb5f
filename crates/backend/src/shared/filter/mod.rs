//! Row filtering shared by every dashboard page.
//!
//! A page turns its dropdown selections into a list of [`Criterion`] values and
//! calls [`apply`] together with the caller's [`IdentityScope`]. Criteria with
//! an empty selection are identities, so "nothing selected" means "everything".

pub mod options;
pub mod scope;

use chrono::{Datelike, NaiveDate};
use contracts::shared::view::ClosingMonthWindow;

use crate::shared::data::row_set::{DatePart, Row, RowSet};

pub use options::{date_part_options, dropdown_options, window_options};
pub use scope::IdentityScope;

#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Single dropdown value; blank means no filter
    Equals { column: String, value: String },
    InSet { column: String, values: Vec<String> },
    /// Component of a date column (year, month, ...) within `values`
    DatePart {
        column: String,
        part: DatePart,
        values: Vec<String>,
    },
    /// Closing-month windows relative to `today`
    MonthWindow {
        column: String,
        windows: Vec<ClosingMonthWindow>,
        today: NaiveDate,
    },
    Range {
        column: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Criterion {
    pub fn equals(column: &str, value: Option<&str>) -> Self {
        Criterion::Equals {
            column: column.to_string(),
            value: value.unwrap_or_default().trim().to_string(),
        }
    }

    pub fn in_set(column: &str, values: &[String]) -> Self {
        Criterion::InSet {
            column: column.to_string(),
            values: values.to_vec(),
        }
    }

    pub fn date_part(column: &str, part: DatePart, values: Vec<String>) -> Self {
        Criterion::DatePart {
            column: column.to_string(),
            part,
            values,
        }
    }

    pub fn month_window(column: &str, windows: &[ClosingMonthWindow], today: NaiveDate) -> Self {
        Criterion::MonthWindow {
            column: column.to_string(),
            windows: windows.to_vec(),
            today,
        }
    }

    /// True when the selection is empty and the criterion keeps every row
    pub fn is_identity(&self) -> bool {
        match self {
            Criterion::Equals { value, .. } => value.trim().is_empty(),
            Criterion::InSet { values, .. } | Criterion::DatePart { values, .. } => {
                values.is_empty()
            }
            Criterion::MonthWindow { windows, .. } => windows.is_empty(),
            Criterion::Range { min, max, .. } => min.is_none() && max.is_none(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        if self.is_identity() {
            return true;
        }
        match self {
            Criterion::Equals { column, value } => {
                row.get(column).key().as_deref() == Some(value.as_str())
            }
            Criterion::InSet { column, values } => match row.get(column).key() {
                Some(key) => values.iter().any(|v| *v == key),
                None => false,
            },
            Criterion::DatePart {
                column,
                part,
                values,
            } => match row.date(column) {
                Some(date) => {
                    let extracted = part.extract(date);
                    values.iter().any(|v| *v == extracted)
                }
                None => false,
            },
            Criterion::MonthWindow {
                column,
                windows,
                today,
            } => {
                let window = classify_month(row.date(column), *today);
                windows.contains(&window)
            }
            Criterion::Range { column, min, max } => match row.number(column) {
                Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
                None => false,
            },
        }
    }
}

/// Window a closing date falls into; undated rows are `Other`
pub fn classify_month(date: Option<NaiveDate>, today: NaiveDate) -> ClosingMonthWindow {
    let Some(date) = date else {
        return ClosingMonthWindow::Other;
    };
    let (next_year, next_month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };

    if date.year() == today.year() && date.month() == today.month() {
        ClosingMonthWindow::ThisMonth
    } else if date.year() == next_year && date.month() == next_month {
        ClosingMonthWindow::NextMonth
    } else {
        ClosingMonthWindow::Other
    }
}

/// Rows passing the identity scope and every criterion.
///
/// `scope_column` names the column compared with a restricted principal; pages
/// without an identity column pass `None` and the scope is ignored.
pub fn apply(
    rows: &RowSet,
    scope_column: Option<&str>,
    scope: &IdentityScope,
    criteria: &[Criterion],
) -> RowSet {
    let active: Vec<&Criterion> = criteria.iter().filter(|c| !c.is_identity()).collect();
    let scoped_column = scope_column.filter(|_| scope.is_restricted());

    if active.is_empty() && scoped_column.is_none() {
        return rows.clone();
    }

    rows.select(|row| {
        let in_scope = match scoped_column {
            Some(column) => scope.permits(row.get(column).as_text()),
            None => true,
        };
        in_scope && active.iter().all(|c| c.matches(row))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::row_set::CellValue;
    use maplit::hashmap;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoices() -> RowSet {
        let row = |location: &str, entity: &str, day: NaiveDate, amount: f64| {
            Row::new(hashmap! {
                "location".to_string() => CellValue::Text(location.into()),
                "entity".to_string() => CellValue::Text(entity.into()),
                "invoice_date".to_string() => CellValue::Date(day),
                "amount".to_string() => CellValue::Number(amount),
            })
        };
        RowSet::new(
            vec![
                "location".into(),
                "entity".into(),
                "invoice_date".into(),
                "amount".into(),
            ],
            vec![
                row("NYC", "Acme", date(2023, 1, 10), 100.0),
                row("NYC", "Beta", date(2024, 2, 5), 200.0),
                row("LA", "Acme", date(2024, 1, 20), 300.0),
                row("SF", "Gamma", date(2024, 7, 1), 50.0),
            ],
        )
    }

    fn locations(rows: &RowSet) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("location").key().unwrap_or_default())
            .collect()
    }

    #[test]
    fn no_criteria_and_unrestricted_returns_input() {
        let rows = invoices();
        let out = apply(&rows, Some("location"), &IdentityScope::Unrestricted, &[]);
        assert_eq!(out, rows);

        let empty = [
            Criterion::in_set("location", &[]),
            Criterion::equals("entity", Some("  ")),
            Criterion::date_part("invoice_date", DatePart::Year, vec![]),
        ];
        assert_eq!(apply(&rows, None, &IdentityScope::Unrestricted, &empty), rows);
    }

    #[test]
    fn filtering_is_idempotent_and_order_independent() {
        let rows = invoices();
        let by_year = Criterion::date_part("invoice_date", DatePart::Year, vec!["2024".into()]);
        let by_entity = Criterion::in_set("entity", &["Acme".to_string(), "Beta".to_string()]);
        let scope = IdentityScope::Unrestricted;

        let once = apply(&rows, None, &scope, &[by_year.clone(), by_entity.clone()]);
        let twice = apply(&once, None, &scope, &[by_year.clone(), by_entity.clone()]);
        let swapped = apply(&rows, None, &scope, &[by_entity, by_year]);

        assert_eq!(locations(&once), vec!["NYC", "LA"]);
        assert_eq!(once, twice);
        assert_eq!(once, swapped);
    }

    #[test]
    fn equals_ignores_surrounding_whitespace_in_selection() {
        let rows = invoices();
        let padded = apply(
            &rows,
            None,
            &IdentityScope::Unrestricted,
            &[Criterion::equals("location", Some(" NYC "))],
        );
        assert_eq!(locations(&padded), vec!["NYC", "NYC"]);
    }

    #[test]
    fn restricted_scope_is_conjoined_with_selections() {
        let rows = invoices();
        let scope = IdentityScope::Restricted("NYC".into());

        let only_scope = apply(&rows, Some("location"), &scope, &[]);
        assert_eq!(locations(&only_scope), vec!["NYC", "NYC"]);

        // selecting another location cannot widen a restricted view
        let other = apply(
            &rows,
            Some("location"),
            &scope,
            &[Criterion::in_set("location", &["LA".to_string()])],
        );
        assert!(other.is_empty());

        // pages without an identity column ignore the scope
        assert_eq!(apply(&rows, None, &scope, &[]).len(), 4);
    }

    #[test]
    fn date_parts_and_ranges() {
        let rows = invoices();
        let scope = IdentityScope::Unrestricted;

        let january = apply(
            &rows,
            None,
            &scope,
            &[Criterion::date_part(
                "invoice_date",
                DatePart::MonthName,
                vec!["January".into()],
            )],
        );
        assert_eq!(locations(&january), vec!["NYC", "LA"]);

        let q3 = apply(
            &rows,
            None,
            &scope,
            &[Criterion::date_part("invoice_date", DatePart::Quarter, vec!["Q3".into()])],
        );
        assert_eq!(locations(&q3), vec!["SF"]);

        let mid = apply(
            &rows,
            None,
            &scope,
            &[Criterion::Range {
                column: "amount".into(),
                min: Some(100.0),
                max: Some(250.0),
            }],
        );
        assert_eq!(locations(&mid), vec!["NYC", "NYC"]);
    }

    #[test]
    fn month_windows_resolve_against_today() {
        let today = date(2024, 12, 15);
        let deal = |d: Option<NaiveDate>| {
            Row::new(hashmap! {
                "closing_date".to_string() => d.map(CellValue::Date).unwrap_or(CellValue::Null),
            })
        };
        let rows = RowSet::new(
            vec!["closing_date".into()],
            vec![
                deal(Some(date(2024, 12, 1))),
                deal(Some(date(2025, 1, 31))),
                deal(Some(date(2023, 12, 3))),
                deal(None),
            ],
        );
        let pick = |windows: &[ClosingMonthWindow]| {
            apply(
                &rows,
                None,
                &IdentityScope::Unrestricted,
                &[Criterion::month_window("closing_date", windows, today)],
            )
            .len()
        };

        assert_eq!(pick(&[ClosingMonthWindow::ThisMonth]), 1);
        assert_eq!(pick(&[ClosingMonthWindow::NextMonth]), 1);
        assert_eq!(pick(&[ClosingMonthWindow::Other]), 2);
        assert_eq!(
            pick(&[ClosingMonthWindow::ThisMonth, ClosingMonthWindow::Other]),
            3
        );
        assert_eq!(pick(&ClosingMonthWindow::ALL), 4);
    }
}
