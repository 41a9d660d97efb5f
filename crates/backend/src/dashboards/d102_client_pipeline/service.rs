use chrono::NaiveDate;
use contracts::dashboards::d102_client_pipeline::{ClientPipelineFilters, ClientPipelineView};

use crate::dashboards::pipeline::{self, PipelineSelection, PipelineSpec};
use crate::shared::data::row_set::RowSet;

pub const CLIENT_STAGES: [&str; 12] = [
    "Agreement Signed",
    "Awareness",
    "Closed (Future prospect)",
    "Closed (Lost)",
    "Did Not Proceed",
    "Discovery",
    "Engagement Completed",
    "Implementation",
    "Issue Agreement",
    "Needs Identified",
    "Ongoing Services",
    "Prospect",
];

const SPEC: PipelineSpec = PipelineSpec {
    stages: &CLIENT_STAGES,
    chart_title: "Deals in Pipeline by Deal Owner Name and Stage",
    with_one_time_revenue: true,
};

pub fn compute_view(deals: &RowSet, filters: &ClientPipelineFilters, today: NaiveDate) -> ClientPipelineView {
    let parts = pipeline::compute(
        deals,
        &SPEC,
        PipelineSelection {
            deal_owners: &filters.deal_owners,
            closing_months: &filters.closing_months,
            extra: Vec::new(),
            today,
        },
    );

    ClientPipelineView {
        kpis: parts.kpis,
        stage_table: parts.stage_table,
        owner_stage_chart: parts.owner_stage_chart,
        deal_owner_options: parts.deal_owner_options,
        closing_month_options: parts.closing_month_options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::pipeline::tests::deal_row;
    use contracts::shared::view::ClosingMonthWindow;

    #[test]
    fn client_page_reports_three_kpis() {
        let deals = RowSet::new(
            vec![],
            vec![
                deal_row("Ann", "Ongoing Services", Some((2024, 6, 3)), 1200.5, 300.0, "East"),
                deal_row("Bob", "Awareness", Some((2024, 9, 3)), 100.0, 0.0, "East"),
                deal_row("Bob", "New Lead", Some((2024, 6, 3)), 50.0, 0.0, "East"),
                deal_row("Cy", "New Lead", Some((2024, 6, 4)), 75.0, 0.0, "West"),
            ],
        );
        let filters = ClientPipelineFilters {
            deal_owners: vec![],
            closing_months: vec![ClosingMonthWindow::ThisMonth],
        };
        let view = compute_view(&deals, &filters, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());

        let titles: Vec<&str> = view.kpis.iter().map(|k| k.title.as_str()).collect();
        assert_eq!(titles, vec!["Ongoing Revenue", "One-Time Revenue", "Deals Closing"]);
        assert_eq!(view.kpis[0].value, "$1,200.50");
        assert_eq!(view.kpis[1].value, "$300.00");
        assert_eq!(view.kpis[2].value, "1");
        assert_eq!(view.closing_month_options.len(), 3);
        // "New Lead" is a franchise stage, its owners are still selectable
        let owners: Vec<&str> = view.deal_owner_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(owners, vec!["Ann", "Bob", "Cy"]);
    }
}
