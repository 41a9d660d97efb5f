use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Typed scalar of a loaded row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Null,
}

impl CellValue {
    /// Numeric view used by aggregation; anything non-numeric counts as absent
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// String form used for equality filters and grouping keys
    pub fn key(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_plain_number(*n)),
            CellValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            CellValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// Whole numbers print without a fraction so "2024" matches a numeric 2024.0
fn format_plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Component extracted from a date column for filtering and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// "2024"
    Year,
    /// "1".."12"
    Month,
    /// "January".."December"
    MonthName,
    /// "Q1".."Q4"
    Quarter,
    /// "2024-03"
    YearMonth,
}

impl DatePart {
    pub fn extract(&self, date: NaiveDate) -> String {
        match self {
            DatePart::Year => date.year().to_string(),
            DatePart::Month => date.month().to_string(),
            DatePart::MonthName => MONTH_NAMES[date.month0() as usize].to_string(),
            DatePart::Quarter => format!("Q{}", date.month0() / 3 + 1),
            DatePart::YearMonth => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }

    /// Chronological position of the extracted value, used to order options and groups
    pub fn sort_index(&self, date: NaiveDate) -> i64 {
        match self {
            DatePart::Year => date.year() as i64,
            DatePart::Month | DatePart::MonthName => date.month() as i64,
            DatePart::Quarter => (date.month0() / 3 + 1) as i64,
            DatePart::YearMonth => date.year() as i64 * 100 + date.month() as i64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub values: HashMap<String, CellValue>,
}

impl Row {
    pub fn new(values: HashMap<String, CellValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&CellValue::Null)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).as_number()
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        self.get(column).as_date()
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.values.insert(column.to_string(), value);
    }
}

/// Ordered rows with a known column list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Same columns, only the rows matching `keep`
    pub fn select<F>(&self, keep: F) -> RowSet
    where
        F: Fn(&Row) -> bool,
    {
        RowSet {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: Fn(&Row) -> bool,
    {
        self.rows.retain(|r| keep(r));
    }

    /// Replace null or blank text in `column` with `fallback`
    pub fn fill_blank(&mut self, column: &str, fallback: &str) {
        for row in &mut self.rows {
            let blank = match row.get(column) {
                CellValue::Null => true,
                CellValue::Text(s) => s.trim().is_empty(),
                _ => false,
            };
            if blank {
                row.set(column, CellValue::Text(fallback.to_string()));
            }
        }
    }

    /// Rewrite every text cell of `column`
    pub fn map_text<F>(&mut self, column: &str, f: F)
    where
        F: Fn(&str) -> String,
    {
        for row in &mut self.rows {
            if let CellValue::Text(s) = row.get(column) {
                let mapped = f(s);
                row.set(column, CellValue::Text(mapped));
            }
        }
    }
}
