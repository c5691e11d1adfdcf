use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{month_index, Dataset, Record};

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Dimension the bar chart groups cases by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Location,
    #[default]
    FilingYear,
    FilingMonth,
}

impl GroupBy {
    pub const ALL: [GroupBy; 3] = [GroupBy::Location, GroupBy::FilingYear, GroupBy::FilingMonth];

    /// Axis label for the category dimension.
    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Location => "Zip Code",
            GroupBy::FilingYear => "Filing Year",
            GroupBy::FilingMonth => "Filing Month",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordering of the bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartOrder {
    /// Zips alphabetical, years numeric, months in calendar order.
    #[default]
    Category,
    /// Highest count first; ties keep category order.
    CountDesc,
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Bar chart input: one `(category, count)` pair per bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub group_by: GroupBy,
    pub points: Vec<(String, usize)>,
}

impl ChartSeries {
    pub fn categories(&self) -> Vec<String> {
        self.points.iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn total(&self) -> usize {
        self.points.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sort key giving each dimension its natural order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CategoryKey {
    Text(String),
    Number(i64),
}

fn category_of(record: &Record, group_by: GroupBy) -> (CategoryKey, String) {
    match group_by {
        GroupBy::Location => (CategoryKey::Text(record.location.clone()), record.location.clone()),
        GroupBy::FilingYear => {
            let year = record.filing_year();
            (CategoryKey::Number(year as i64), year.to_string())
        }
        GroupBy::FilingMonth => {
            let month = record.filing_month();
            let idx = month_index(month).unwrap_or_default();
            (CategoryKey::Number(idx as i64), month.to_string())
        }
    }
}

/// Count cases per category, in the category's natural order.
pub fn create_chart_data(dataset: &Dataset, group_by: GroupBy) -> ChartSeries {
    create_chart_data_ordered(dataset, group_by, ChartOrder::Category)
}

pub fn create_chart_data_ordered(dataset: &Dataset, group_by: GroupBy, order: ChartOrder) -> ChartSeries {
    let mut counts: BTreeMap<CategoryKey, (String, usize)> = BTreeMap::new();
    for record in dataset {
        let (key, label) = category_of(record, group_by);
        counts.entry(key).or_insert((label, 0)).1 += 1;
    }

    let mut points: Vec<(String, usize)> = counts.into_values().collect();
    if order == ChartOrder::CountDesc {
        // stable sort keeps category order among equal counts
        points.sort_by(|a, b| b.1.cmp(&a.1));
    }

    ChartSeries { group_by, points }
}
