use std::collections::{BTreeMap, HashMap};

use super::percent_of;
use crate::shared::data::row_set::{DatePart, Row, RowSet};
use crate::shared::data::tables::UNKNOWN;

pub const TOTAL_KEY: &str = "Total";

#[derive(Debug, Clone)]
enum GroupKey {
    Column(String),
    DatePart { column: String, part: DatePart },
}

/// Group-by over one key with summed measures
#[derive(Debug, Clone)]
pub struct Grouping {
    key: GroupKey,
    measures: Vec<String>,
}

/// One aggregated row: group key, number of source rows, summed measures
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub values: HashMap<String, f64>,
}

impl GroupSummary {
    fn empty(key: &str) -> Self {
        Self {
            key: key.to_string(),
            count: 0,
            values: HashMap::new(),
        }
    }

    pub fn get(&self, measure: &str) -> f64 {
        self.values.get(measure).copied().unwrap_or(0.0)
    }
}

/// Groups in ascending key order plus an optional trailing total
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub measures: Vec<String>,
    pub groups: Vec<GroupSummary>,
    pub total: Option<GroupSummary>,
}

/// Percent of grand total per group and for the total row
#[derive(Debug, Clone, PartialEq)]
pub struct Shares {
    pub groups: Vec<f64>,
    pub total: f64,
}

impl Grouping {
    pub fn by_column(column: &str) -> Self {
        Self {
            key: GroupKey::Column(column.to_string()),
            measures: Vec::new(),
        }
    }

    pub fn by_date_part(column: &str, part: DatePart) -> Self {
        Self {
            key: GroupKey::DatePart {
                column: column.to_string(),
                part,
            },
            measures: Vec::new(),
        }
    }

    pub fn sum(mut self, measure: &str) -> Self {
        self.measures.push(measure.to_string());
        self
    }

    /// Sort position and display key of a row; null keys group under "Unknown"
    fn key_of(&self, row: &Row) -> (i64, String) {
        match &self.key {
            GroupKey::Column(column) => match row.get(column).key() {
                Some(key) if !key.trim().is_empty() => (0, key),
                _ => (0, UNKNOWN.to_string()),
            },
            GroupKey::DatePart { column, part } => match row.date(column) {
                Some(date) => (part.sort_index(date), part.extract(date)),
                None => (i64::MAX, UNKNOWN.to_string()),
            },
        }
    }

    pub fn summarize(&self, rows: &RowSet) -> Summary {
        let mut groups: BTreeMap<(i64, String), GroupSummary> = BTreeMap::new();

        for row in rows.iter() {
            let key = self.key_of(row);
            let group = groups
                .entry(key)
                .or_insert_with_key(|(_, display)| GroupSummary::empty(display));
            group.count += 1;
            for measure in &self.measures {
                let value = row.number(measure).unwrap_or(0.0);
                *group.values.entry(measure.clone()).or_insert(0.0) += value;
            }
        }

        Summary {
            measures: self.measures.clone(),
            groups: groups.into_values().collect(),
            total: None,
        }
    }
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.key.clone()).collect()
    }

    /// Per-group values of `measure`, aligned with `labels()`
    pub fn series(&self, measure: &str) -> Vec<f64> {
        self.groups.iter().map(|g| g.get(measure)).collect()
    }

    pub fn grand_total(&self, measure: &str) -> f64 {
        self.groups
            .iter()
            .map(|g| g.get(measure))
            .fold(0.0, |acc, v| acc + v)
    }

    pub fn grand_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Adds a per-group value computed from that group's measures.
    /// Apply before `with_total` so the total row carries the column sum.
    pub fn derive<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&GroupSummary) -> f64,
    {
        for group in &mut self.groups {
            let value = f(group);
            group.values.insert(name.to_string(), value);
        }
        self.measures.push(name.to_string());
        self
    }

    /// Appends the "Total" row: the column-wise sum of every group.
    /// Nothing is appended when there are no groups.
    pub fn with_total(mut self) -> Self {
        if self.groups.is_empty() {
            self.total = None;
            return self;
        }
        let mut total = GroupSummary::empty(TOTAL_KEY);
        total.count = self.grand_count();
        for measure in &self.measures {
            total
                .values
                .insert(measure.clone(), self.grand_total(measure));
        }
        self.total = Some(total);
        self
    }

    /// Groups followed by the total row, if any
    pub fn rows(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups.iter().chain(self.total.iter())
    }

    /// Percentage of the grand total per group for the given basis
    pub fn shares<F>(&self, basis: F) -> Shares
    where
        F: Fn(&GroupSummary) -> f64,
    {
        let values: Vec<f64> = self.groups.iter().map(&basis).collect();
        let grand = values.iter().fold(0.0, |acc, v| acc + v);
        Shares {
            groups: values.iter().map(|v| percent_of(*v, grand)).collect(),
            total: if grand == 0.0 { 0.0 } else { 100.0 },
        }
    }
}
