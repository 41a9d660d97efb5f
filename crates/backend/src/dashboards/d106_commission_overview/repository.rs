use crate::shared::aggregate;
use crate::shared::data::row_set::RowSet;
use crate::shared::data::source::{load_or_empty, ColumnSpec, DataSource, SourceQuery};

const PAID_PREDICATE: &str = "UPPER(TRIM(status)) = 'PAID'";

pub const INVOICE_DATE: &str = "invoice_date";
pub const INVOICE_AMOUNT: &str = "invoice_amount";

/// (KPI title, table, commission column) of every paid total shown on the page
pub const PAID_SOURCES: [(&str, &str, &str); 5] = [
    ("MP Commission Paid", "mp_md_commissions", "mp_commission"),
    ("Practice MP Commission Paid", "practice_mp", "practice_mp_commission"),
    ("3rd Party Payout Paid", "third_party_commission", "third_party_payout"),
    ("MP as PM Commission Paid", "mp_as_pm_commission", "mp_as_pm_commission"),
    ("Practice MD Commission Paid", "practice_md", "practice_md_commission"),
];

pub fn paid_query(table: &'static str, column: &'static str) -> SourceQuery {
    SourceQuery::table(table, vec![ColumnSpec::number(column)]).filtered(PAID_PREDICATE, vec![])
}

/// Paid commission per source, in `PAID_SOURCES` order
pub async fn load_paid_sums(source: &dyn DataSource) -> Vec<f64> {
    let mut sums = Vec::with_capacity(PAID_SOURCES.len());
    for (_, table, column) in PAID_SOURCES {
        let rows = load_or_empty(source, &paid_query(table, column)).await;
        sums.push(aggregate::sum(&rows, column));
    }
    sums
}

pub async fn load_practice_mp_invoices(source: &dyn DataSource) -> RowSet {
    let query = SourceQuery::table(
        "practice_mp",
        vec![ColumnSpec::date(INVOICE_DATE), ColumnSpec::number(INVOICE_AMOUNT)],
    );
    load_or_empty(source, &query).await
}
