use std::collections::{BTreeSet, HashMap};

use crate::shared::data::row_set::{Row, RowSet};
use crate::shared::data::tables::UNKNOWN;

/// Row counts per (row key, series key) pair, e.g. deals per owner and stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossCount {
    /// Ordered by descending row total, ties alphabetically
    pub row_keys: Vec<String>,
    /// Ascending
    pub series_keys: Vec<String>,
    cells: HashMap<(String, String), usize>,
}

impl CrossCount {
    pub fn get(&self, row_key: &str, series_key: &str) -> usize {
        self.cells
            .get(&(row_key.to_string(), series_key.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Counts of one series aligned with `row_keys`
    pub fn series(&self, series_key: &str) -> Vec<f64> {
        self.row_keys
            .iter()
            .map(|r| self.get(r, series_key) as f64)
            .collect()
    }

    pub fn row_total(&self, row_key: &str) -> usize {
        self.series_keys.iter().map(|s| self.get(row_key, s)).sum()
    }
}

fn key_or_unknown(row: &Row, column: &str) -> String {
    match row.get(column).key() {
        Some(key) if !key.trim().is_empty() => key,
        _ => UNKNOWN.to_string(),
    }
}

pub fn cross_count(rows: &RowSet, row_column: &str, series_column: &str) -> CrossCount {
    let mut cells: HashMap<(String, String), usize> = HashMap::new();
    let mut row_totals: HashMap<String, usize> = HashMap::new();
    let mut series_keys: BTreeSet<String> = BTreeSet::new();

    for row in rows.iter() {
        let row_key = key_or_unknown(row, row_column);
        let series_key = key_or_unknown(row, series_column);
        *cells.entry((row_key.clone(), series_key.clone())).or_insert(0) += 1;
        *row_totals.entry(row_key).or_insert(0) += 1;
        series_keys.insert(series_key);
    }

    let mut row_keys: Vec<(String, usize)> = row_totals.into_iter().collect();
    row_keys.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    CrossCount {
        row_keys: row_keys.into_iter().map(|(k, _)| k).collect(),
        series_keys: series_keys.into_iter().collect(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::row_set::CellValue;
    use maplit::hashmap;

    fn deals(pairs: &[(&str, &str)]) -> RowSet {
        RowSet::new(
            vec!["owner".into(), "stage".into()],
            pairs
                .iter()
                .map(|(owner, stage)| {
                    Row::new(hashmap! {
                        "owner".to_string() => CellValue::Text(owner.to_string()),
                        "stage".to_string() => CellValue::Text(stage.to_string()),
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn owners_sorted_by_descending_total() {
        let counts = cross_count(
            &deals(&[
                ("Bo", "Prospect"),
                ("Al", "Discovery"),
                ("Bo", "Discovery"),
                ("Cy", "Prospect"),
                ("Bo", "Prospect"),
            ]),
            "owner",
            "stage",
        );

        assert_eq!(counts.row_keys, vec!["Bo", "Al", "Cy"]);
        assert_eq!(counts.series_keys, vec!["Discovery", "Prospect"]);
        assert_eq!(counts.series("Prospect"), vec![2.0, 0.0, 1.0]);
        assert_eq!(counts.row_total("Bo"), 3);
        assert_eq!(counts.get("Al", "Prospect"), 0);
    }

    #[test]
    fn empty_rows_give_empty_matrix() {
        let counts = cross_count(&RowSet::default(), "owner", "stage");
        assert!(counts.row_keys.is_empty());
        assert!(counts.series_keys.is_empty());
    }
}
