use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Month names
// ---------------------------------------------------------------------------

/// Full English month names, indexed by `month0()`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full month name for a date, e.g. `"March"`.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Calendar position (0 = January) of a full month name.
pub fn month_index(name: &str) -> Option<usize> {
    MONTH_NAMES.iter().position(|m| *m == name)
}

// ---------------------------------------------------------------------------
// Record – one foreclosure case
// ---------------------------------------------------------------------------

/// A single foreclosure case (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zip code the property is located in.
    pub location: String,
    /// Date the foreclosure action was filed.
    pub filing_date: NaiveDate,
    /// Date of the foreclosure sale; `None` when the case has not been sold.
    pub sale_date: Option<NaiveDate>,
    /// Buyer at the foreclosure sale.
    pub purchaser: Option<String>,
    /// Every other raw CSV column, unmodified: column_name → cell.
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn filing_year(&self) -> i32 {
        self.filing_date.year()
    }

    pub fn filing_month(&self) -> &'static str {
        month_name(self.filing_date)
    }

    pub fn sale_month(&self) -> Option<&'static str> {
        self.sale_date.map(month_name)
    }

    /// Raw pass-through cell, empty when the column was not in the file.
    pub fn extra(&self, column: &str) -> &str {
        self.extra.get(column).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Dataset – an ordered collection of records
// ---------------------------------------------------------------------------

/// The loaded (or filtered) table of foreclosure cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Records in file order.
    pub records: Vec<Record>,
    /// Header row of the source file, in file order.
    pub column_names: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, column_names: Vec<String>) -> Self {
        Dataset {
            records,
            column_names,
        }
    }

    /// A dataset with the same schema but a different set of rows.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Dataset {
            records,
            column_names: self.column_names.clone(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Compact constructor used by the unit tests of the data layer.
#[cfg(test)]
pub(crate) fn record(location: &str, filed: &str, sold: Option<&str>, purchaser: Option<&str>) -> Record {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    Record {
        location: location.to_string(),
        filing_date: parse(filed),
        sale_date: sold.map(parse),
        purchaser: purchaser.map(str::to_string),
        extra: BTreeMap::new(),
    }
}
