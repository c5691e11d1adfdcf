use std::collections::HashMap;
use std::hash::Hash;

use super::error::{DataError, Result};
use super::model::Dataset;

/// Headline statistics shown on the summary cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub total_foreclosures: usize,
    pub popular_zip: String,
    pub popular_foreclosure_month: String,
    /// `None` when no case in the dataset has been sold.
    pub popular_sale_month: Option<String>,
    /// `None` when no case in the dataset has a purchaser.
    pub popular_purchaser: Option<String>,
}

/// Compute the summary metrics of a non-empty dataset.
///
/// Callers are expected to check `dataset.is_empty()` first and show a
/// "no data" state instead; an empty dataset yields [`DataError::EmptyDataset`].
pub fn calculate_metrics(dataset: &Dataset) -> Result<Metrics> {
    if dataset.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    let popular_zip = mode(dataset.iter().map(|r| r.location.as_str())).ok_or(DataError::EmptyDataset)?;
    let popular_foreclosure_month = mode(dataset.iter().map(|r| r.filing_month())).ok_or(DataError::EmptyDataset)?;

    Ok(Metrics {
        total_foreclosures: dataset.len(),
        popular_zip: popular_zip.to_string(),
        popular_foreclosure_month: popular_foreclosure_month.to_string(),
        popular_sale_month: mode(dataset.iter().filter_map(|r| r.sale_month())).map(str::to_string),
        popular_purchaser: mode(dataset.iter().filter_map(|r| r.purchaser.as_deref())).map(str::to_string),
    })
}

/// Most frequent value of `values`. Ties go to the value whose first
/// occurrence comes earliest. `None` for an empty iterator.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Copy,
    I: IntoIterator<Item = T>,
{
    // value → (count, first position)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (pos, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, pos)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    #[test]
    fn popular_zip_is_most_frequent() {
        let ds = Dataset::new(
            vec![
                record("40204", "2020-01-01", None, None),
                record("40202", "2020-01-02", None, None),
                record("40202", "2020-01-03", None, None),
                record("40204", "2020-01-04", None, None),
                record("40202", "2020-01-05", None, None),
            ],
            Vec::new(),
        );
        let m = calculate_metrics(&ds).unwrap();
        assert_eq!(m.total_foreclosures, 5);
        assert_eq!(m.popular_zip, "40202");
    }

    #[test]
    fn popular_filing_month() {
        let ds = Dataset::new(
            vec![
                record("40202", "2020-03-15", None, None),
                record("40204", "2020-03-20", None, None),
                record("40204", "2020-03-15", None, None),
            ],
            Vec::new(),
        );
        assert_eq!(calculate_metrics(&ds).unwrap().popular_foreclosure_month, "March");
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let ds = Dataset::new(
            vec![
                record("40299", "2020-05-01", None, None),
                record("40202", "2020-06-01", None, None),
                record("40202", "2020-06-02", None, None),
                record("40299", "2020-05-02", None, None),
            ],
            Vec::new(),
        );
        for _ in 0..20 {
            let m = calculate_metrics(&ds).unwrap();
            assert_eq!(m.popular_zip, "40299");
            assert_eq!(m.popular_foreclosure_month, "May");
        }
    }

    #[test]
    fn missing_sale_fields_are_ignored() {
        let ds = Dataset::new(
            vec![
                record("40202", "2020-01-01", None, None),
                record("40202", "2020-01-01", None, None),
                record("40202", "2020-01-01", Some("2020-08-01"), Some("ACME LLC")),
            ],
            Vec::new(),
        );
        let m = calculate_metrics(&ds).unwrap();
        assert_eq!(m.popular_sale_month.as_deref(), Some("August"));
        assert_eq!(m.popular_purchaser.as_deref(), Some("ACME LLC"));

        let unsold = Dataset::new(vec![record("40202", "2020-01-01", None, None)], Vec::new());
        let m = calculate_metrics(&unsold).unwrap();
        assert_eq!(m.popular_sale_month, None);
        assert_eq!(m.popular_purchaser, None);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(matches!(
            calculate_metrics(&Dataset::default()),
            Err(DataError::EmptyDataset)
        ));
    }

    #[test]
    fn mode_of_nothing_is_none() {
        assert_eq!(mode(Vec::<u8>::new()), None);
        assert_eq!(mode([3, 1, 1, 3, 2]), Some(3));
    }
}
