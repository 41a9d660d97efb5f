use chrono::Datelike;

use super::row_set::{CellValue, RowSet};
use super::source::{load_or_empty, ColumnSpec, DataSource, SourceQuery};

pub const UNKNOWN: &str = "Unknown";

/// Column names of the invoices row set
pub mod invoice {
    pub const NUMBER: &str = "invoice_number";
    pub const ENTITY: &str = "invoice_entity";
    pub const DATE: &str = "invoice_date";
    pub const AMOUNT_USD: &str = "invoice_amount_usd";
    /// Stored as `quantity` in the source table
    pub const OUTSTANDING: &str = "outstanding_amount";
    pub const LOCATION: &str = "location";
    pub const ACCOUNT_CODE: &str = "account_code";
}

/// Column names of the deals row set
pub mod deal {
    pub const OWNER: &str = "deal_owner_name";
    pub const NAME: &str = "deal_name";
    pub const STAGE: &str = "stage";
    pub const STATUS: &str = "status";
    pub const AMOUNT: &str = "amount";
    pub const CONSULTING_FEE: &str = "consulting_fee";
    pub const CLOSING_DATE: &str = "closing_date";
    pub const SALES_CYCLE_DURATION: &str = "sales_cycle_duration";
    pub const BILLING_COMPANY: &str = "billing_company";
    pub const REGION: &str = "region";
}

pub fn invoices_query() -> SourceQuery {
    SourceQuery::table(
        "invoices",
        vec![
            ColumnSpec::text(invoice::NUMBER),
            ColumnSpec::text(invoice::ENTITY),
            ColumnSpec::date(invoice::DATE),
            ColumnSpec::number(invoice::AMOUNT_USD),
            ColumnSpec::number_expr(invoice::OUTSTANDING, "quantity"),
            ColumnSpec::text(invoice::LOCATION),
            ColumnSpec::text(invoice::ACCOUNT_CODE),
        ],
    )
}

pub fn deals_query() -> SourceQuery {
    SourceQuery::table(
        "deals",
        vec![
            ColumnSpec::text(deal::OWNER),
            ColumnSpec::text(deal::NAME),
            ColumnSpec::text(deal::STAGE),
            ColumnSpec::text(deal::STATUS),
            ColumnSpec::number(deal::AMOUNT),
            ColumnSpec::number(deal::CONSULTING_FEE),
            ColumnSpec::date(deal::CLOSING_DATE),
            ColumnSpec::number(deal::SALES_CYCLE_DURATION),
            ColumnSpec::text(deal::BILLING_COMPANY),
            ColumnSpec::text(deal::REGION),
        ],
    )
}

pub async fn load_invoices(source: &dyn DataSource, min_invoice_year: i32) -> RowSet {
    let mut rows = load_or_empty(source, &invoices_query()).await;
    prepare_invoices(&mut rows, min_invoice_year);
    tracing::info!("Preloaded {} invoices", rows.len());
    rows
}

pub async fn load_deals(source: &dyn DataSource) -> RowSet {
    let mut rows = load_or_empty(source, &deals_query()).await;
    prepare_deals(&mut rows);
    tracing::info!("Preloaded {} active deals", rows.len());
    rows
}

/// Drops undated and too-old invoices and names missing locations and account codes
pub fn prepare_invoices(rows: &mut RowSet, min_invoice_year: i32) {
    rows.retain(|row| {
        row.date(invoice::DATE)
            .map(|d| d.year() >= min_invoice_year)
            .unwrap_or(false)
    });
    rows.fill_blank(invoice::LOCATION, UNKNOWN);
    rows.fill_blank(invoice::ACCOUNT_CODE, UNKNOWN);
}

/// Keeps active deals only; owners default to "Unknown", revenue columns to 0
pub fn prepare_deals(rows: &mut RowSet) {
    rows.map_text(deal::STATUS, |s| s.trim().to_lowercase());
    rows.retain(|row| row.get(deal::STATUS).as_text() == Some("active"));
    rows.fill_blank(deal::OWNER, UNKNOWN);
    for row in &mut rows.rows {
        for column in [deal::AMOUNT, deal::CONSULTING_FEE] {
            if row.number(column).is_none() {
                row.set(column, CellValue::Number(0.0));
            }
        }
    }
}
