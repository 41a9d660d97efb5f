use serde::{Deserialize, Serialize};

/// Single selectable value of a dashboard dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    /// Option whose label equals its value
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Accent used when a card is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiTone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

/// Labeled scalar summary shown as a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    /// Caption (e.g., "Invoice Amount")
    pub title: String,
    /// Already formatted value (e.g., "$1,200")
    pub value: String,
    pub tone: KpiTone,
}

/// Row table with display strings; the last row is the synthetic total when
/// `has_total_row` is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub has_total_row: bool,
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Donut,
}

/// One trace of a chart: parallel label/value vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Horizontal stacked bar: one series per stack segment, values aligned with `categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackedBarChart {
    pub title: String,
    /// Category axis in display order
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Symbolic closing-month selection resolved against the current month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingMonthWindow {
    ThisMonth,
    NextMonth,
    Other,
}

impl ClosingMonthWindow {
    pub const ALL: [ClosingMonthWindow; 3] = [
        ClosingMonthWindow::ThisMonth,
        ClosingMonthWindow::NextMonth,
        ClosingMonthWindow::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClosingMonthWindow::ThisMonth => "This Month",
            ClosingMonthWindow::NextMonth => "Next Month",
            ClosingMonthWindow::Other => "Other",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            ClosingMonthWindow::ThisMonth => "this_month",
            ClosingMonthWindow::NextMonth => "next_month",
            ClosingMonthWindow::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_month_window_uses_dropdown_values() {
        let parsed: Vec<ClosingMonthWindow> =
            serde_json::from_str(r#"["this_month", "other"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![ClosingMonthWindow::ThisMonth, ClosingMonthWindow::Other]
        );
        for window in ClosingMonthWindow::ALL {
            let json = serde_json::to_string(&window).unwrap();
            assert_eq!(json, format!("\"{}\"", window.value()));
        }
    }

    #[test]
    fn missing_filter_fields_default_to_empty() {
        let filters: crate::dashboards::d100_overview::OverviewFilters =
            serde_json::from_str("{}").unwrap();
        assert!(filters.years.is_empty());
        assert!(filters.mp_codes.is_empty());

        let detail: crate::dashboards::d105_commission_detail::CommissionDetailFilters =
            serde_json::from_str(r#"{"year": 2024, "selections": {"mp": "  "}}"#).unwrap();
        assert_eq!(detail.year, Some(2024));
        assert_eq!(detail.month, None);
        assert_eq!(
            detail
                .selections
                .get(crate::dashboards::d105_commission_detail::CommissionSectionId::Mp),
            None
        );
    }
}
