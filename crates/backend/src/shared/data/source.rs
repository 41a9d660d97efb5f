use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryResult, Statement};
use std::collections::HashMap;
use thiserror::Error;

use super::row_set::{CellValue, Row, RowSet};

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("query against {table} failed: {source}")]
    Query {
        table: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

/// Column of a source query. `expr` is a static SQL expression (e.g. `TRIM(location)`);
/// the column name itself is used when absent.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub expr: Option<&'static str>,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            expr: None,
            kind: ColumnKind::Text,
        }
    }

    pub const fn number(name: &'static str) -> Self {
        Self {
            name,
            expr: None,
            kind: ColumnKind::Number,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            expr: None,
            kind: ColumnKind::Date,
        }
    }

    pub const fn text_expr(name: &'static str, expr: &'static str) -> Self {
        Self {
            name,
            expr: Some(expr),
            kind: ColumnKind::Text,
        }
    }

    pub const fn number_expr(name: &'static str, expr: &'static str) -> Self {
        Self {
            name,
            expr: Some(expr),
            kind: ColumnKind::Number,
        }
    }
}

/// SELECT over one table with a static column list and an optional parameterized predicate
#[derive(Debug, Clone)]
pub struct SourceQuery {
    pub table: &'static str,
    pub columns: Vec<ColumnSpec>,
    pub predicate: Option<&'static str>,
    pub params: Vec<sea_orm::Value>,
}

impl SourceQuery {
    pub fn table(table: &'static str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            table,
            columns,
            predicate: None,
            params: Vec::new(),
        }
    }

    /// `predicate` uses `?` placeholders bound to `params` in order
    pub fn filtered(mut self, predicate: &'static str, params: Vec<sea_orm::Value>) -> Self {
        self.predicate = Some(predicate);
        self.params = params;
        self
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.to_string()).collect()
    }

    pub fn to_sql(&self) -> String {
        let select = self
            .columns
            .iter()
            .map(|c| match c.expr {
                Some(expr) => format!("{} AS {}", expr, c.name),
                None => c.name.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        match self.predicate {
            Some(predicate) => format!("SELECT {} FROM {} WHERE {}", select, self.table, predicate),
            None => format!("SELECT {} FROM {}", select, self.table),
        }
    }
}

/// Backing store seen by the dashboards
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, query: &SourceQuery) -> Result<RowSet, DataSourceError>;
}

/// Runs `query` and degrades any failure to an empty row set
pub async fn load_or_empty(source: &dyn DataSource, query: &SourceQuery) -> RowSet {
    match source.fetch(query).await {
        Ok(rows) => {
            tracing::debug!("Loaded {} rows from {}", rows.len(), query.table);
            rows
        }
        Err(e) => {
            tracing::error!("Data source failure, using empty result: {}", e);
            RowSet::empty(query.column_names())
        }
    }
}

/// `DataSource` over a sea-orm connection
#[derive(Clone)]
pub struct SqlDataSource {
    conn: DatabaseConnection,
}

impl SqlDataSource {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl DataSource for SqlDataSource {
    async fn fetch(&self, query: &SourceQuery) -> Result<RowSet, DataSourceError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            query.to_sql(),
            query.params.clone(),
        );

        let results = self
            .conn
            .query_all(stmt)
            .await
            .map_err(|source| DataSourceError::Query {
                table: query.table.to_string(),
                source,
            })?;

        let rows = results
            .iter()
            .map(|result| {
                let values: HashMap<String, CellValue> = query
                    .columns
                    .iter()
                    .map(|c| (c.name.to_string(), read_cell(result, c)))
                    .collect();
                Row::new(values)
            })
            .collect();

        Ok(RowSet::new(query.column_names(), rows))
    }
}

fn read_cell(result: &QueryResult, column: &ColumnSpec) -> CellValue {
    match column.kind {
        ColumnKind::Text => read_text(result, column.name)
            .map(|s| CellValue::Text(s.trim().to_string()))
            .unwrap_or(CellValue::Null),
        ColumnKind::Number => read_number(result, column.name),
        ColumnKind::Date => read_text(result, column.name)
            .and_then(|s| parse_date(&s))
            .map(CellValue::Date)
            .unwrap_or(CellValue::Null),
    }
}

fn read_text(result: &QueryResult, name: &str) -> Option<String> {
    if let Ok(v) = result.try_get::<Option<String>>("", name) {
        return v;
    }
    if let Ok(v) = result.try_get::<Option<i64>>("", name) {
        return v.map(|n| n.to_string());
    }
    if let Ok(v) = result.try_get::<Option<f64>>("", name) {
        return v.map(|n| n.to_string());
    }
    None
}

fn read_number(result: &QueryResult, name: &str) -> CellValue {
    if let Ok(v) = result.try_get::<Option<f64>>("", name) {
        return v.map(CellValue::Number).unwrap_or(CellValue::Null);
    }
    if let Ok(v) = result.try_get::<Option<i64>>("", name) {
        return v
            .map(|n| CellValue::Number(n as f64))
            .unwrap_or(CellValue::Null);
    }
    match result.try_get::<Option<String>>("", name) {
        Ok(Some(text)) => parse_number(&text)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Null),
        _ => CellValue::Null,
    }
}

/// Accepts plain numbers and currency text such as "$1,200.50"
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Lenient date parsing; anything unrecognised becomes `None`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    chrono::DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}
