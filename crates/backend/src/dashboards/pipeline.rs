//! Stage table, owner chart and revenue KPIs shared by the client and
//! franchise pipeline pages.

use chrono::NaiveDate;
use contracts::shared::view::{
    ClosingMonthWindow, DataTable, DropdownOption, KpiCard, KpiTone, StackedBarChart,
};
use std::collections::HashMap;

use crate::shared::aggregate::{self, cross_count, Grouping, TOTAL_KEY};
use crate::shared::data::row_set::RowSet;
use crate::shared::data::tables::deal;
use crate::shared::filter::{self, dropdown_options, window_options, Criterion, IdentityScope};
use crate::shared::format::{format_currency_cents, format_number, format_percent};
use crate::shared::presentation::{kpi, stacked_bar, summary_table, SummaryColumn};

/// Static description of one pipeline page
pub struct PipelineSpec {
    pub stages: &'static [&'static str],
    pub chart_title: &'static str,
    /// Client pipeline also reports consulting fees
    pub with_one_time_revenue: bool,
}

pub struct PipelineSelection<'a> {
    pub deal_owners: &'a [String],
    pub closing_months: &'a [ClosingMonthWindow],
    /// Page specific criteria (e.g. region)
    pub extra: Vec<Criterion>,
    pub today: NaiveDate,
}

pub struct PipelineParts {
    pub kpis: Vec<KpiCard>,
    pub stage_table: DataTable,
    pub owner_stage_chart: StackedBarChart,
    /// Owners of every active deal, whatever its stage
    pub deal_owner_options: Vec<DropdownOption>,
    pub closing_month_options: Vec<DropdownOption>,
    /// Deals of the listed stages before any selection, for page specific options
    pub pipeline_deals: RowSet,
}

pub fn compute(deals: &RowSet, spec: &PipelineSpec, selection: PipelineSelection) -> PipelineParts {
    let stages: Vec<String> = spec.stages.iter().map(|s| s.to_string()).collect();
    let unrestricted = IdentityScope::Unrestricted;
    let pipeline_deals = filter::apply(
        deals,
        None,
        &unrestricted,
        &[Criterion::in_set(deal::STAGE, &stages)],
    );

    let mut criteria = vec![
        Criterion::in_set(deal::OWNER, selection.deal_owners),
        Criterion::month_window(deal::CLOSING_DATE, selection.closing_months, selection.today),
    ];
    criteria.extend(selection.extra);
    let rows = filter::apply(&pipeline_deals, None, &unrestricted, &criteria);

    let mut kpis = vec![kpi(
        "Ongoing Revenue",
        format_currency_cents(Some(aggregate::sum(&rows, deal::AMOUNT))),
        KpiTone::Positive,
    )];
    if spec.with_one_time_revenue {
        kpis.push(kpi(
            "One-Time Revenue",
            format_currency_cents(Some(aggregate::sum(&rows, deal::CONSULTING_FEE))),
            KpiTone::Positive,
        ));
    }
    kpis.push(kpi(
        "Deals Closing",
        format_number(aggregate::count(&rows)),
        KpiTone::Neutral,
    ));

    PipelineParts {
        kpis,
        stage_table: stage_table(&rows),
        owner_stage_chart: stacked_bar(spec.chart_title, &cross_count(&rows, deal::OWNER, deal::STAGE)),
        deal_owner_options: dropdown_options(deals, deal::OWNER, &unrestricted),
        closing_month_options: window_options(),
        pipeline_deals,
    }
}

/// Deals per stage with their share of the pipeline; Total is always 100.00%
fn stage_table(rows: &RowSet) -> DataTable {
    let summary = Grouping::by_column(deal::STAGE).summarize(rows).with_total();
    let shares = summary.shares(|g| g.count as f64);

    let mut share_by_stage: HashMap<String, f64> = summary
        .groups
        .iter()
        .map(|g| g.key.clone())
        .zip(shares.groups.iter().copied())
        .collect();
    share_by_stage.insert(TOTAL_KEY.to_string(), shares.total);

    summary_table(
        "Stage",
        &summary,
        &[
            SummaryColumn::new("Deals In Pipeline", |g| g.count.to_string()),
            SummaryColumn::new("%GT Deals In Pipeline", move |g| {
                format_percent(share_by_stage.get(&g.key).copied().unwrap_or(0.0), 2)
            }),
        ],
    )
}
