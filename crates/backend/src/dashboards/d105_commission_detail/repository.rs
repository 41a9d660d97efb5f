use contracts::dashboards::d105_commission_detail::CommissionSectionId;

use crate::shared::data::row_set::RowSet;
use crate::shared::data::source::{load_or_empty, ColumnSpec, DataSource, SourceQuery};

/// Trimmed value the section's dropdown and the identity scope compare against
pub const SCOPE_KEY: &str = "scope_key";
/// Single column of option queries
pub const OPTION_VALUE: &str = "option_value";

/// Parsed date column the period is selected on
pub const INVOICE_DATE: &str = "invoice_date";

/// Every commission table lists locations; their union feeds the location dropdowns
const LOCATION_OPTIONS: &[(&str, &str)] = &[
    ("mp_md_commissions", "TRIM(location)"),
    ("mp_as_pm_commission", "TRIM(location)"),
    ("practice_mp", "TRIM(location)"),
    ("third_party_commission", "TRIM(location)"),
    ("practice_md", "TRIM(location)"),
];

/// Static description of one commission section
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub id: CommissionSectionId,
    pub title: &'static str,
    pub kpi_title: &'static str,
    pub table: &'static str,
    /// SQL expression compared with the dropdown value and the principal
    pub scope_expr: &'static str,
    /// Displayed columns with their headers
    pub columns: Vec<(ColumnSpec, &'static str)>,
    pub commission_column: &'static str,
    /// (table, expression) pairs whose distinct values make up the dropdown
    pub option_sources: &'static [(&'static str, &'static str)],
}

fn detail_columns(
    first: (&'static str, &'static str),
    commission: (&'static str, &'static str),
    with_account_code: bool,
) -> Vec<(ColumnSpec, &'static str)> {
    let mut columns = vec![
        (ColumnSpec::text(first.0), first.1),
        (ColumnSpec::text("client_name"), "Client Name"),
        (ColumnSpec::text("invoice_description"), "Description"),
        (ColumnSpec::date(INVOICE_DATE), "Invoice Date"),
        (ColumnSpec::number("invoice_amount"), "Invoice Amount"),
        (ColumnSpec::date("fully_paid_on_date"), "Fully Paid On"),
        (ColumnSpec::number(commission.0), commission.1),
    ];
    if with_account_code {
        columns.push((ColumnSpec::text("account_code"), "Account Code"));
    }
    columns
}

pub fn section_spec(id: CommissionSectionId) -> SectionSpec {
    match id {
        CommissionSectionId::Mp => SectionSpec {
            id,
            title: "MP Commission Details",
            kpi_title: "MP Commission",
            table: "mp_md_commissions",
            scope_expr: "TRIM(location)",
            columns: detail_columns(
                ("location", "Managing Partner"),
                ("mp_commission", "MP Commission"),
                true,
            ),
            commission_column: "mp_commission",
            option_sources: LOCATION_OPTIONS,
        },
        CommissionSectionId::Md => SectionSpec {
            id,
            title: "MD Commission Details",
            kpi_title: "MD Commission",
            table: "mp_md_commissions",
            scope_expr: "TRIM(department)",
            columns: detail_columns(
                ("department", "Department"),
                ("md_commission", "MD Commission"),
                true,
            ),
            commission_column: "md_commission",
            option_sources: &[("mp_md_commissions", "TRIM(department)")],
        },
        CommissionSectionId::PracticeMp => SectionSpec {
            id,
            title: "Practice MP Commission Details",
            kpi_title: "Practice MP Commission",
            table: "practice_mp",
            scope_expr: "TRIM(practice_mp_name)",
            columns: detail_columns(
                ("practice_mp_name", "Practice MP"),
                ("practice_mp_commission", "Practice MP Commission"),
                false,
            ),
            commission_column: "practice_mp_commission",
            option_sources: &[("practice_mp", "TRIM(practice_mp_name)")],
        },
        CommissionSectionId::PracticeMd => SectionSpec {
            id,
            title: "Practice MD Commission Details",
            kpi_title: "Practice MD Commission",
            table: "practice_md",
            scope_expr: "TRIM(practice_md_name)",
            columns: detail_columns(
                ("practice_md_name", "Practice MD"),
                ("practice_md_commission", "Practice MD Commission"),
                false,
            ),
            commission_column: "practice_md_commission",
            option_sources: &[("practice_md", "TRIM(practice_md_name)")],
        },
        // displays the location but is selected and scoped by the MP acting as PM
        CommissionSectionId::MpAsPm => SectionSpec {
            id,
            title: "MP as PM Commission Details",
            kpi_title: "MP as PM Commission",
            table: "mp_as_pm_commission",
            scope_expr: "TRIM(mp_as_pm)",
            columns: detail_columns(
                ("location", "Location"),
                ("mp_as_pm_commission", "MP as PM Commission"),
                false,
            ),
            commission_column: "mp_as_pm_commission",
            option_sources: &[("mp_as_pm_commission", "TRIM(mp_as_pm)")],
        },
        CommissionSectionId::ThirdParty => SectionSpec {
            id,
            title: "3rd Party Commission Details",
            kpi_title: "3rd Party Payout",
            table: "third_party_commission",
            scope_expr: "TRIM(location)",
            columns: detail_columns(
                ("location", "Location"),
                ("third_party_payout", "3rd Party Payout"),
                false,
            ),
            commission_column: "third_party_payout",
            option_sources: LOCATION_OPTIONS,
        },
    }
}

/// All rows of one section. The period is selected after loading, on the parsed
/// invoice date, so every date layout the loader understands is matched.
pub fn section_query(spec: &SectionSpec) -> SourceQuery {
    let mut columns = vec![ColumnSpec::text_expr(SCOPE_KEY, spec.scope_expr)];
    columns.extend(spec.columns.iter().map(|(column, _)| column.clone()));
    SourceQuery::table(spec.table, columns)
}

pub async fn load_section(source: &dyn DataSource, spec: &SectionSpec) -> RowSet {
    load_or_empty(source, &section_query(spec)).await
}

/// Raw dropdown values of a section (not yet distinct), in column `OPTION_VALUE`
pub async fn load_option_values(source: &dyn DataSource, spec: &SectionSpec) -> RowSet {
    let mut values = RowSet::empty(vec![OPTION_VALUE.to_string()]);
    for &(table, expr) in spec.option_sources {
        let query = SourceQuery::table(table, vec![ColumnSpec::text_expr(OPTION_VALUE, expr)]);
        let rows = load_or_empty(source, &query).await;
        values.rows.extend(rows.rows);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use crate::shared::data::source::SqlDataSource;
    use sea_orm::ConnectionTrait;

    #[test]
    fn section_query_reads_scope_key_first() {
        let query = section_query(&section_spec(CommissionSectionId::MpAsPm));
        let sql = query.to_sql();
        assert!(sql.starts_with("SELECT TRIM(mp_as_pm) AS scope_key, location, client_name"));
        assert!(sql.ends_with("FROM mp_as_pm_commission"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn only_mp_and_md_show_account_codes() {
        for id in CommissionSectionId::ALL {
            let spec = section_spec(id);
            let has_account = spec.columns.iter().any(|(c, _)| c.name == "account_code");
            assert_eq!(
                has_account,
                matches!(id, CommissionSectionId::Mp | CommissionSectionId::Md),
                "{:?}",
                id
            );
            assert!(spec.columns.iter().any(|(c, _)| c.name == spec.commission_column));
        }
    }

    #[tokio::test]
    async fn loads_section_rows_and_location_union() {
        let conn = db::connect_url("sqlite::memory:", 1).await.unwrap();
        conn.execute_unprepared(
            "INSERT INTO mp_md_commissions (location, department, client_name, invoice_date, invoice_amount, mp_commission, md_commission, status) VALUES
                (' NYC ', 'Tax', 'Acme', '2024-03-04', 1000, 100, 50, 'PAID'),
                ('LA', 'Audit', 'Beta', '2024-04-01', 500, 40, 20, 'PAID')",
        )
        .await
        .unwrap();
        conn.execute_unprepared(
            "INSERT INTO third_party_commission (location, invoice_date, third_party_payout) VALUES
                ('Denver', '2024-03-09', 75)",
        )
        .await
        .unwrap();
        let source = SqlDataSource::new(conn);

        let mp = section_spec(CommissionSectionId::Mp);
        let rows = load_section(&source, &mp).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.rows[0].get(SCOPE_KEY).as_text(), Some("NYC"));
        assert_eq!(rows.rows[0].number("mp_commission"), Some(100.0));

        let options = load_option_values(&source, &mp).await;
        let mut values: Vec<String> = options
            .iter()
            .filter_map(|r| r.get(OPTION_VALUE).key())
            .collect();
        values.sort();
        assert_eq!(values, vec!["Denver", "LA", "NYC"]);
    }
}
