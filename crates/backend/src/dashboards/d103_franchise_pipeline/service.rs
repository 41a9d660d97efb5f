use chrono::NaiveDate;
use contracts::dashboards::d103_franchise_pipeline::{FranchisePipelineFilters, FranchisePipelineView};
use contracts::shared::view::DropdownOption;

use crate::dashboards::pipeline::{self, PipelineSelection, PipelineSpec};
use crate::shared::data::row_set::RowSet;
use crate::shared::data::tables::deal;
use crate::shared::filter::{dropdown_options, Criterion, IdentityScope};

pub const FRANCHISE_STAGES: [&str; 4] = [
    "New Lead",
    "Introduction Meeting",
    "FDD Review",
    "Application Form & Background Verification",
];

/// Region selection value that disables the region filter
pub const ALL_REGIONS: &str = "All";

const SPEC: PipelineSpec = PipelineSpec {
    stages: &FRANCHISE_STAGES,
    chart_title: "Deals in Franchise Pipeline by Deal Owner Name and Stage",
    with_one_time_revenue: false,
};

pub fn compute_view(
    deals: &RowSet,
    filters: &FranchisePipelineFilters,
    today: NaiveDate,
) -> FranchisePipelineView {
    let regions: &[String] = if filters.regions.iter().any(|r| r == ALL_REGIONS) {
        &[]
    } else {
        &filters.regions
    };

    let parts = pipeline::compute(
        deals,
        &SPEC,
        PipelineSelection {
            deal_owners: &filters.deal_owners,
            closing_months: &filters.closing_months,
            extra: vec![Criterion::in_set(deal::REGION, regions)],
            today,
        },
    );

    let mut region_options = vec![DropdownOption::plain(ALL_REGIONS)];
    region_options.extend(dropdown_options(
        &parts.pipeline_deals,
        deal::REGION,
        &IdentityScope::Unrestricted,
    ));

    FranchisePipelineView {
        kpis: parts.kpis,
        stage_table: parts.stage_table,
        owner_stage_chart: parts.owner_stage_chart,
        deal_owner_options: parts.deal_owner_options,
        closing_month_options: parts.closing_month_options,
        region_options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::pipeline::tests::deal_row;

    fn deals() -> RowSet {
        RowSet::new(
            vec![],
            vec![
                deal_row("Ann", "New Lead", None, 100.0, 0.0, "East"),
                deal_row("Bob", "FDD Review", None, 200.0, 0.0, "West"),
                deal_row("Cy", "Prospect", None, 400.0, 0.0, "North"),
            ],
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    #[test]
    fn all_region_disables_region_filter() {
        let filters = FranchisePipelineFilters {
            regions: vec!["All".into(), "East".into()],
            ..Default::default()
        };
        let view = compute_view(&deals(), &filters, today());
        assert_eq!(view.kpis.len(), 2);
        assert_eq!(view.kpis[0].value, "$300.00");
        assert_eq!(view.kpis[1].value, "2");
    }

    #[test]
    fn region_selection_filters_and_lists_options() {
        let filters = FranchisePipelineFilters {
            regions: vec!["West".into()],
            ..Default::default()
        };
        let view = compute_view(&deals(), &filters, today());
        assert_eq!(view.kpis[0].value, "$200.00");

        let regions: Vec<&str> = view.region_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(regions, vec!["All", "East", "West"]);
    }
}
