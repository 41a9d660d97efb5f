pub mod cross;
pub mod grouping;

use crate::shared::data::row_set::RowSet;

pub use cross::{cross_count, CrossCount};
pub use grouping::{GroupSummary, Grouping, Shares, Summary, TOTAL_KEY};

/// Sum of the numeric cells of `column`; nulls and text count as 0
pub fn sum(rows: &RowSet, column: &str) -> f64 {
    rows.iter()
        .filter_map(|r| r.number(column))
        .fold(0.0, |acc, v| acc + v)
}

pub fn count(rows: &RowSet) -> usize {
    rows.len()
}

/// Mean over the numeric cells only; `None` when there are none
pub fn mean(rows: &RowSet, column: &str) -> Option<f64> {
    let values: Vec<f64> = rows.iter().filter_map(|r| r.number(column)).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// `part / whole * 100`, or 0 when the ratio is undefined
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    part / whole * 100.0
}

pub fn combined_total(values: &[f64]) -> f64 {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold(0.0, |acc, v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::row_set::{CellValue, Row};
    use maplit::hashmap;

    fn amounts(values: &[CellValue]) -> RowSet {
        RowSet::new(
            vec!["amount".into()],
            values
                .iter()
                .map(|v| Row::new(hashmap! { "amount".to_string() => v.clone() }))
                .collect(),
        )
    }

    #[test]
    fn sums_skip_non_numeric_cells() {
        let rows = amounts(&[
            CellValue::Number(10.0),
            CellValue::Null,
            CellValue::Text("n/a".into()),
            CellValue::Number(2.5),
        ]);
        assert_eq!(sum(&rows, "amount"), 12.5);
        assert_eq!(count(&rows), 4);
        assert_eq!(mean(&rows, "amount"), Some(6.25));
    }

    #[test]
    fn empty_inputs_are_zero_or_none() {
        let rows = amounts(&[]);
        assert_eq!(sum(&rows, "amount"), 0.0);
        assert!(sum(&rows, "amount").is_sign_positive());
        assert!(combined_total(&[]).is_sign_positive());
        assert_eq!(mean(&rows, "amount"), None);
        assert_eq!(mean(&amounts(&[CellValue::Null]), "amount"), None);
    }

    #[test]
    fn percent_of_handles_zero_denominator() {
        assert_eq!(percent_of(25.0, 200.0), 12.5);
        assert_eq!(percent_of(25.0, 0.0), 0.0);
        assert_eq!(percent_of(f64::NAN, 10.0), 0.0);
        assert_eq!(percent_of(1.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn combined_total_ignores_non_finite() {
        assert_eq!(combined_total(&[100.0, 50.5, f64::NAN, 0.0]), 150.5);
        assert_eq!(combined_total(&[]), 0.0);
    }
}
