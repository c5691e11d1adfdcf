use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter options: everything a user can pick from
// ---------------------------------------------------------------------------

/// Distinct selectable values of the full dataset, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub years: Vec<i32>,
}

/// Collect the distinct locations (lexicographic) and filing years (numeric).
pub fn get_filter_options(dataset: &Dataset) -> FilterOptions {
    let locations: BTreeSet<&str> = dataset.iter().map(|r| r.location.as_str()).collect();
    let years: BTreeSet<i32> = dataset.iter().map(|r| r.filing_year()).collect();

    FilterOptions {
        locations: locations.into_iter().map(str::to_string).collect(),
        years: years.into_iter().collect(),
    }
}

// ---------------------------------------------------------------------------
// Filter selection: what the user picked
// ---------------------------------------------------------------------------

/// Selected locations and years.
///
/// Unlike a per-column "no constraint" default, an empty set here means
/// nothing is selected on that dimension and the filter matches no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub locations: BTreeSet<String>,
    pub years: BTreeSet<i32>,
}

impl FilterSelection {
    /// Everything selected (the dashboard's starting state).
    pub fn all(options: &FilterOptions) -> Self {
        FilterSelection {
            locations: options.locations.iter().cloned().collect(),
            years: options.years.iter().copied().collect(),
        }
    }

    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        filter_data(dataset, &self.locations, &self.years)
    }
}

/// Return the records whose location is in `locations` AND whose filing year
/// is in `years`, in their original order.
pub fn filter_data(dataset: &Dataset, locations: &BTreeSet<String>, years: &BTreeSet<i32>) -> Dataset {
    if locations.is_empty() || years.is_empty() {
        return dataset.with_records(Vec::new());
    }

    let records = dataset
        .iter()
        .filter(|r| locations.contains(&r.location) && years.contains(&r.filing_year()))
        .cloned()
        .collect();

    dataset.with_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                record("40208", "2019-01-10", None, None),
                record("40202", "2020-03-15", None, None),
                record("40204", "2019-06-01", None, None),
                record("40202", "2021-08-20", None, None),
                record("40208", "2020-02-02", None, None),
            ],
            Vec::new(),
        )
    }

    fn set<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
        items.iter().cloned().collect()
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let options = get_filter_options(&sample());
        assert_eq!(options.locations, vec!["40202", "40204", "40208"]);
        assert_eq!(options.years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn years_sort_numerically() {
        let ds = Dataset::new(
            vec![
                record("A", "2010-01-01", None, None),
                record("A", "0999-01-01", None, None),
            ],
            Vec::new(),
        );
        assert_eq!(get_filter_options(&ds).years, vec![999, 2010]);
    }

    #[test]
    fn filter_is_sound_complete_and_ordered() {
        let ds = sample();
        let locations = set(&["40202".to_string(), "40208".to_string()]);
        let years = set(&[2019, 2020]);
        let out = filter_data(&ds, &locations, &years);

        for r in &out {
            assert!(locations.contains(&r.location));
            assert!(years.contains(&r.filing_year()));
        }
        let expected: Vec<_> = ds
            .iter()
            .filter(|r| locations.contains(&r.location) && years.contains(&r.filing_year()))
            .cloned()
            .collect();
        assert_eq!(out.records, expected);
        assert_eq!(out.len(), 3);
        assert_eq!(out.records[0].location, "40208");
        assert_eq!(out.records[1].location, "40202");
    }

    #[test]
    fn full_selection_is_identity() {
        let ds = sample();
        let selection = FilterSelection::all(&get_filter_options(&ds));
        assert_eq!(selection.apply(&ds), ds);
    }

    #[test]
    fn empty_selection_on_either_dimension_is_empty() {
        let ds = sample();
        let options = get_filter_options(&ds);
        let all = FilterSelection::all(&options);

        assert!(filter_data(&ds, &BTreeSet::new(), &all.years).is_empty());
        assert!(filter_data(&ds, &all.locations, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let ds = sample();
        let before = ds.clone();
        let _ = filter_data(&ds, &set(&["40204".to_string()]), &set(&[2019]));
        assert_eq!(ds, before);
    }
}
