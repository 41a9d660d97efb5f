//! Builders turning aggregates into the view types of `contracts::shared::view`.

use contracts::shared::view::{
    ChartKind, ChartSeries, DataTable, KpiCard, KpiTone, StackedBarChart,
};

use crate::shared::aggregate::{CrossCount, GroupSummary, Summary};

pub fn kpi(title: &str, value: String, tone: KpiTone) -> KpiCard {
    KpiCard {
        title: title.to_string(),
        value,
        tone,
    }
}

/// Display column of a summary table: header plus a cell renderer per row
pub struct SummaryColumn<'a> {
    pub header: &'a str,
    pub render: Box<dyn Fn(&GroupSummary) -> String + 'a>,
}

impl<'a> SummaryColumn<'a> {
    pub fn new<F>(header: &'a str, render: F) -> Self
    where
        F: Fn(&GroupSummary) -> String + 'a,
    {
        Self {
            header,
            render: Box::new(render),
        }
    }
}

/// One row per group, then the total row when the summary has one
pub fn summary_table(key_header: &str, summary: &Summary, columns: &[SummaryColumn]) -> DataTable {
    let mut headers = vec![key_header.to_string()];
    headers.extend(columns.iter().map(|c| c.header.to_string()));

    let rows = summary
        .rows()
        .map(|group| {
            let mut cells = vec![group.key.clone()];
            cells.extend(columns.iter().map(|c| (c.render)(group)));
            cells
        })
        .collect();

    DataTable {
        columns: headers,
        rows,
        has_total_row: summary.total.is_some(),
    }
}

pub fn series(name: &str, kind: ChartKind, labels: Vec<String>, values: Vec<f64>) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        kind,
        labels,
        values,
    }
}

/// Summary measure as a chart trace keyed by group label
pub fn summary_series(name: &str, kind: ChartKind, summary: &Summary, measure: &str) -> ChartSeries {
    series(name, kind, summary.labels(), summary.series(measure))
}

/// One bar segment per series key, categories in `counts.row_keys` order
pub fn stacked_bar(title: &str, counts: &CrossCount) -> StackedBarChart {
    StackedBarChart {
        title: title.to_string(),
        categories: counts.row_keys.clone(),
        series: counts
            .series_keys
            .iter()
            .map(|key| series(key, ChartKind::Bar, counts.row_keys.clone(), counts.series(key)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::aggregate::Grouping;
    use crate::shared::data::row_set::{CellValue, Row, RowSet};
    use crate::shared::format::format_amount;
    use maplit::hashmap;

    #[test]
    fn summary_table_ends_with_total() {
        let rows = RowSet::new(
            vec![],
            vec![
                Row::new(hashmap! {
                    "entity".to_string() => CellValue::Text("B".into()),
                    "amount".to_string() => CellValue::Number(1500.0),
                }),
                Row::new(hashmap! {
                    "entity".to_string() => CellValue::Text("A".into()),
                    "amount".to_string() => CellValue::Number(250.0),
                }),
            ],
        );
        let summary = Grouping::by_column("entity")
            .sum("amount")
            .summarize(&rows)
            .with_total();
        let table = summary_table(
            "Entity",
            &summary,
            &[SummaryColumn::new("Amount", |g| format_amount(g.get("amount")))],
        );

        assert_eq!(table.columns, vec!["Entity", "Amount"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["A".to_string(), "250".to_string()],
                vec!["B".to_string(), "1,500".to_string()],
                vec!["Total".to_string(), "1,750".to_string()],
            ]
        );
        assert!(table.has_total_row);
    }
}
