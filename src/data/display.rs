use chrono::NaiveDate;

use super::model::{Dataset, Record};

/// Address parts of the export, joined in this order.
const ADDRESS_COLUMNS: [&str; 5] = ["House_Nr", "Dir", "Street_Name", "St_Type", "Post_Dir"];

/// Header of the details table.
pub const DISPLAY_COLUMNS: [&str; 8] = [
    "Case #",
    "Filed",
    "Address",
    "Zip",
    "Neighborhood",
    "Sale Date",
    "Sale Price",
    "Purchaser",
];

/// Presentation-ready copy of a dataset: every cell already a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the details table shown under the chart.
pub fn format_data_for_display(dataset: &Dataset) -> DisplayTable {
    DisplayTable {
        columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: dataset.iter().map(display_row).collect(),
    }
}

fn display_row(r: &Record) -> Vec<String> {
    vec![
        r.extra("Case_").to_string(),
        format_date(r.filing_date),
        format_address(r),
        r.location.clone(),
        r.extra("Neighborhood").to_string(),
        r.sale_date.map(format_date).unwrap_or_default(),
        format_price(r.extra("Sale_Price")),
        r.purchaser.clone().unwrap_or_default(),
    ]
}

fn format_address(r: &Record) -> String {
    ADDRESS_COLUMNS
        .iter()
        .map(|c| r.extra(c).trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Mar 15, 2020`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// `$95,000` for numeric cells, the raw text otherwise.
fn format_price(raw: &str) -> String {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let sign = if v < 0.0 { "-" } else { "" };
            format!("{sign}${}", format_count(v.abs().round() as u64))
        }
        _ => raw.to_string(),
    }
}

/// Render a count with thousands separators: `12345` → `12,345`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
