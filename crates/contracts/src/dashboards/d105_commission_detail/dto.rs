use serde::{Deserialize, Serialize};

use crate::shared::view::{DataTable, DropdownOption, KpiCard};

/// Commission table shown on the detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionSectionId {
    Mp,
    Md,
    PracticeMp,
    PracticeMd,
    MpAsPm,
    ThirdParty,
}

impl CommissionSectionId {
    pub const ALL: [CommissionSectionId; 6] = [
        CommissionSectionId::Mp,
        CommissionSectionId::Md,
        CommissionSectionId::PracticeMp,
        CommissionSectionId::PracticeMd,
        CommissionSectionId::MpAsPm,
        CommissionSectionId::ThirdParty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionSectionId::Mp => "mp",
            CommissionSectionId::Md => "md",
            CommissionSectionId::PracticeMp => "practice_mp",
            CommissionSectionId::PracticeMd => "practice_md",
            CommissionSectionId::MpAsPm => "mp_as_pm",
            CommissionSectionId::ThirdParty => "third_party",
        }
    }
}

/// Per-section dropdown selections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionSelections {
    pub mp: Option<String>,
    pub md: Option<String>,
    pub practice_mp: Option<String>,
    pub practice_md: Option<String>,
    pub mp_as_pm: Option<String>,
    pub third_party: Option<String>,
}

impl CommissionSelections {
    pub fn get(&self, section: CommissionSectionId) -> Option<&str> {
        let value = match section {
            CommissionSectionId::Mp => &self.mp,
            CommissionSectionId::Md => &self.md,
            CommissionSectionId::PracticeMp => &self.practice_mp,
            CommissionSectionId::PracticeMd => &self.practice_md,
            CommissionSectionId::MpAsPm => &self.mp_as_pm,
            CommissionSectionId::ThirdParty => &self.third_party,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionDetailFilters {
    pub year: Option<i32>,
    /// 1..=12
    pub month: Option<u32>,
    pub selections: CommissionSelections,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionSectionView {
    pub id: CommissionSectionId,
    pub title: String,
    pub table: DataTable,
    pub kpi: KpiCard,
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionDetailView {
    pub sections: Vec<CommissionSectionView>,
    /// Sum of all section commissions
    pub total: KpiCard,
}
