use contracts::dashboards::d105_commission_detail::{
    CommissionDetailFilters, CommissionDetailView, CommissionSectionId, CommissionSectionView,
};
use contracts::shared::view::{DataTable, KpiTone};

use super::repository::{self, SectionSpec, INVOICE_DATE, OPTION_VALUE, SCOPE_KEY};
use crate::shared::aggregate::{self, combined_total};
use crate::shared::data::row_set::{DatePart, Row, RowSet};
use crate::shared::data::source::{ColumnKind, ColumnSpec, DataSource};
use crate::shared::filter::{self, dropdown_options, Criterion, IdentityScope};
use crate::shared::format::{format_currency, format_currency_cents};
use crate::shared::presentation::kpi;

/// Loaded rows of one section and its raw dropdown values
pub struct SectionData {
    pub spec: SectionSpec,
    pub rows: RowSet,
    pub options: RowSet,
}

pub fn export_filename(id: CommissionSectionId) -> String {
    format!("{}_commission_details.csv", id.as_str())
}

/// Year and month when both are selected
fn period(filters: &CommissionDetailFilters) -> Option<(i32, u32)> {
    match (filters.year, filters.month) {
        (Some(year), Some(month)) if (1..=12).contains(&month) => Some((year, month)),
        _ => None,
    }
}

pub async fn load_sections(
    source: &dyn DataSource,
    filters: &CommissionDetailFilters,
    ids: &[CommissionSectionId],
) -> Vec<SectionData> {
    let with_rows = period(filters).is_some();
    let mut sections = Vec::with_capacity(ids.len());
    for &id in ids {
        let spec = repository::section_spec(id);
        let rows = if with_rows {
            repository::load_section(source, &spec).await
        } else {
            RowSet::empty(vec![SCOPE_KEY.to_string()])
        };
        let options = repository::load_option_values(source, &spec).await;
        sections.push(SectionData { spec, rows, options });
    }
    sections
}

/// Rows of the selected month visible to the caller under the section's dropdown
fn visible_rows(section: &SectionData, filters: &CommissionDetailFilters, scope: &IdentityScope) -> RowSet {
    let Some((year, month)) = period(filters) else {
        return RowSet::empty(section.rows.columns.clone());
    };
    filter::apply(
        &section.rows,
        Some(SCOPE_KEY),
        scope,
        &[
            Criterion::date_part(INVOICE_DATE, DatePart::Year, vec![year.to_string()]),
            Criterion::date_part(INVOICE_DATE, DatePart::Month, vec![month.to_string()]),
            Criterion::equals(SCOPE_KEY, filters.selections.get(section.spec.id)),
        ],
    )
}

pub fn compute_view(
    sections: &[SectionData],
    filters: &CommissionDetailFilters,
    scope: &IdentityScope,
) -> CommissionDetailView {
    let mut totals = Vec::with_capacity(sections.len());
    let views = sections
        .iter()
        .map(|section| {
            let rows = visible_rows(section, filters, scope);
            let commission = aggregate::sum(&rows, section.spec.commission_column);
            totals.push(commission);

            CommissionSectionView {
                id: section.spec.id,
                title: section.spec.title.to_string(),
                table: section_table(&section.spec, &rows),
                kpi: kpi(section.spec.kpi_title, format_currency(Some(commission)), KpiTone::Positive),
                options: dropdown_options(&section.options, OPTION_VALUE, scope),
            }
        })
        .collect();

    CommissionDetailView {
        sections: views,
        total: kpi(
            "Total Commission",
            format_currency(Some(combined_total(&totals))),
            KpiTone::Positive,
        ),
    }
}

pub async fn get_commission_detail(
    source: &dyn DataSource,
    filters: &CommissionDetailFilters,
    scope: &IdentityScope,
) -> CommissionDetailView {
    let sections = load_sections(source, filters, &CommissionSectionId::ALL).await;
    compute_view(&sections, filters, scope)
}

/// Displayed table of a single section, as exported
pub async fn get_section_table(
    source: &dyn DataSource,
    filters: &CommissionDetailFilters,
    scope: &IdentityScope,
    id: CommissionSectionId,
) -> DataTable {
    let sections = load_sections(source, filters, &[id]).await;
    sections
        .first()
        .map(|section| section_table(&section.spec, &visible_rows(section, filters, scope)))
        .unwrap_or_default()
}

fn render_cell(row: &Row, column: &ColumnSpec) -> String {
    match column.kind {
        ColumnKind::Number => row
            .number(column.name)
            .map(|n| format_currency_cents(Some(n)))
            .unwrap_or_default(),
        ColumnKind::Text | ColumnKind::Date => row.get(column.name).key().unwrap_or_default(),
    }
}

/// Section rows followed by a Total row summing the numeric columns
fn section_table(spec: &SectionSpec, rows: &RowSet) -> DataTable {
    let mut table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| spec.columns.iter().map(|(c, _)| render_cell(row, c)).collect())
        .collect();

    let has_total_row = !rows.is_empty();
    if has_total_row {
        let total = spec
            .columns
            .iter()
            .enumerate()
            .map(|(i, (column, _))| match column.kind {
                _ if i == 0 => "Total".to_string(),
                ColumnKind::Number => format_currency_cents(Some(aggregate::sum(rows, column.name))),
                _ => String::new(),
            })
            .collect();
        table_rows.push(total);
    }

    DataTable {
        columns: spec.columns.iter().map(|(_, h)| h.to_string()).collect(),
        rows: table_rows,
        has_total_row,
    }
}
