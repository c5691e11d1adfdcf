use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use super::error::{DataError, Result, RowError};
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// Names of the CSV columns the data layer depends on.
///
/// Defaults match the Louisville Metro property-foreclosures export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub location: String,
    pub filing_date: String,
    pub sale_date: String,
    pub purchaser: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            location: "Zip".to_string(),
            filing_date: "Action_Filed".to_string(),
            sale_date: "Sale_Date".to_string(),
            purchaser: "Purchaser".to_string(),
        }
    }
}

/// What to do with a row whose required fields cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Drop the row and record it in the [`LoadReport`].
    #[default]
    Skip,
    /// Fail the whole load with [`DataError::Parse`].
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub columns: ColumnMap,
    pub row_policy: RowPolicy,
}

// ---------------------------------------------------------------------------
// Load output
// ---------------------------------------------------------------------------

/// What happened to the rows of the input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// One entry per dropped row.
    pub row_errors: Vec<RowError>,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    pub report: LoadReport,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the foreclosures CSV at `path` with the default column names,
/// dropping rows whose dates cannot be parsed.
pub fn load_and_preprocess_data(path: impl AsRef<Path>) -> Result<Dataset> {
    load_with_options(path.as_ref(), &LoadOptions::default()).map(|loaded| loaded.dataset)
}

/// Load a foreclosures CSV from disk.
pub fn load_with_options(path: &Path, options: &LoadOptions) -> Result<Loaded> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DataError::Io(e),
    })?;

    let loaded = load_from_reader(file, options)?;
    log::info!(
        "Loaded {} foreclosure cases from {} ({} rows skipped)",
        loaded.report.rows_kept,
        path.display(),
        loaded.report.row_errors.len()
    );
    Ok(loaded)
}

/// Parse CSV text from any reader. The header row is required.
pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Loaded> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let layout = ColumnLayout::resolve(&headers, &options.columns)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0;

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        rows_read += 1;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_no + 2);

        match layout.parse_row(&row, line) {
            Ok(record) => records.push(record),
            Err(err) => {
                if options.row_policy == RowPolicy::Skip {
                    log::warn!("Skipping row: {err}");
                }
                row_errors.push(err);
            }
        }
    }

    if options.row_policy == RowPolicy::Strict && !row_errors.is_empty() {
        return Err(DataError::Parse { errors: row_errors });
    }

    let report = LoadReport {
        rows_read,
        rows_kept: records.len(),
        row_errors,
    };
    Ok(Loaded {
        dataset: Dataset::new(records, headers),
        report,
    })
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header.
struct ColumnLayout<'a> {
    headers: &'a [String],
    names: &'a ColumnMap,
    location: usize,
    filing_date: usize,
    sale_date: usize,
    purchaser: usize,
}

impl<'a> ColumnLayout<'a> {
    fn resolve(headers: &'a [String], names: &'a ColumnMap) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(ColumnLayout {
            headers,
            names,
            location: find(&names.location)?,
            filing_date: find(&names.filing_date)?,
            sale_date: find(&names.sale_date)?,
            purchaser: find(&names.purchaser)?,
        })
    }

    fn is_required(&self, idx: usize) -> bool {
        idx == self.location || idx == self.filing_date || idx == self.sale_date || idx == self.purchaser
    }

    fn parse_row(&self, row: &StringRecord, line: usize) -> std::result::Result<Record, RowError> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let error = |column: &str, value: &str, message: &str| RowError {
            line,
            column: column.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        };

        let location = normalize_location(cell(self.location));
        if location.is_empty() {
            return Err(error(&self.names.location, "", "location is empty"));
        }

        let filed = cell(self.filing_date);
        if filed.is_empty() {
            return Err(error(&self.names.filing_date, filed, "filing date is empty"));
        }
        let filing_date = parse_date(filed)
            .ok_or_else(|| error(&self.names.filing_date, filed, "unrecognised date format"))?;

        let sold = cell(self.sale_date);
        let sale_date = if sold.is_empty() {
            None
        } else {
            Some(
                parse_date(sold)
                    .ok_or_else(|| error(&self.names.sale_date, sold, "unrecognised date format"))?,
            )
        };

        let purchaser = Some(cell(self.purchaser))
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let mut extra = BTreeMap::new();
        for (idx, header) in self.headers.iter().enumerate() {
            if self.is_required(idx) {
                continue;
            }
            extra.insert(header.clone(), cell(idx).to_string());
        }

        Ok(Record {
            location,
            filing_date,
            sale_date,
            purchaser,
            extra,
        })
    }
}

/// Accepted date layouts for the date part of a cell. Any time-of-day or
/// offset suffix (`2020/03/15 00:00:00+00`, `2020-03-15T10:00:00Z`) is dropped
/// before matching.
const DATE_FORMATS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%m/%d/%Y"];

/// Parse a calendar date from a CSV cell.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().split(|c: char| c == ' ' || c == 'T').next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Trim a zip cell and drop the `.0` a float-typed export column leaves behind.
fn normalize_location(s: &str) -> String {
    let s = s.trim();
    match s.strip_suffix(".0") {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.to_string()
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "House_Nr,Street_Name,Zip,Action_Filed,Case_,Sale_Date,Sale_Price,Purchaser";

    fn load(body: &str, policy: RowPolicy) -> Result<Loaded> {
        let text = format!("{HEADER}\n{body}");
        let options = LoadOptions {
            row_policy: policy,
            ..LoadOptions::default()
        };
        load_from_reader(text.as_bytes(), &options)
    }

    #[test]
    fn parses_export_date_format_and_derives_fields() {
        let loaded = load(
            "123,MAIN,40202,2020/03/15 00:00:00+00,20CI001,2021/01/05 00:00:00+00,95000,BANK OF AMERICA\n",
            RowPolicy::Skip,
        )
        .unwrap();

        let r = &loaded.dataset.records[0];
        assert_eq!(r.location, "40202");
        assert_eq!(r.filing_date, NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
        assert_eq!(r.filing_year(), 2020);
        assert_eq!(r.filing_month(), "March");
        assert_eq!(r.sale_month(), Some("January"));
        assert_eq!(r.purchaser.as_deref(), Some("BANK OF AMERICA"));
        assert_eq!(r.extra("Case_"), "20CI001");
        assert_eq!(r.extra("House_Nr"), "123");
        assert!(!r.extra.contains_key("Zip"));
        assert_eq!(loaded.dataset.column_names.len(), 8);
    }

    #[test]
    fn empty_sale_fields_are_not_errors() {
        let loaded = load("1,ELM,40204,2019-07-01,19CI9,,,\n", RowPolicy::Strict).unwrap();
        let r = &loaded.dataset.records[0];
        assert_eq!(r.sale_date, None);
        assert_eq!(r.purchaser, None);
        assert_eq!(loaded.report.rows_kept, 1);
    }

    #[test]
    fn skip_policy_drops_and_reports_bad_rows() {
        let body = "\
1,ELM,40204,2019-07-01,A,,,
2,OAK,40205,not a date,B,,,
3,ASH,,2019-07-02,C,,,
4,FIR,40206,2019-07-03,D,someday,,
";
        let loaded = load(body, RowPolicy::Skip).unwrap();
        assert_eq!(loaded.report.rows_read, 4);
        assert_eq!(loaded.report.rows_kept, 1);

        let lines: Vec<usize> = loaded.report.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(loaded.report.row_errors[0].column, "Action_Filed");
        assert_eq!(loaded.report.row_errors[1].column, "Zip");
        assert_eq!(loaded.report.row_errors[2].column, "Sale_Date");
    }

    #[test]
    fn strict_policy_fails_with_every_bad_row() {
        let body = "1,ELM,40204,13/45/2019,A,,,\n2,OAK,40205,2019-01-01,B,,,\n3,ASH,40206,,C,,,\n";
        match load(body, RowPolicy::Strict) {
            Err(DataError::Parse { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].line, 2);
                assert_eq!(errors[0].value, "13/45/2019");
                assert_eq!(errors[1].line, 4);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_date_column_is_reported_by_name() {
        let text = "Zip,Sale_Date,Purchaser\n40202,,\n";
        let err = load_from_reader(text.as_bytes(), &LoadOptions::default()).unwrap_err();
        match err {
            DataError::MissingColumn { column } => assert_eq!(column, "Action_Filed"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn custom_column_names() {
        let text = "zip_code,filed,sold,buyer\n40202,2020-03-15,,\n";
        let options = LoadOptions {
            columns: ColumnMap {
                location: "zip_code".into(),
                filing_date: "filed".into(),
                sale_date: "sold".into(),
                purchaser: "buyer".into(),
            },
            row_policy: RowPolicy::Strict,
        };
        let loaded = load_from_reader(text.as_bytes(), &options).unwrap();
        assert_eq!(loaded.dataset.len(), 1);
    }

    #[test]
    fn accepted_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2020, 3, 15);
        for s in [
            "2020/03/15 00:00:00+00",
            "2020-03-15",
            "2020-03-15 13:45:00",
            "2020-03-15T13:45:00Z",
            "2020/03/15",
            "03/15/2020",
        ] {
            assert_eq!(parse_date(s), expected, "{s}");
        }
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("March 15"), None);
    }

    #[test]
    fn float_formatted_zips_are_normalised() {
        assert_eq!(normalize_location(" 40202.0 "), "40202");
        assert_eq!(normalize_location("40202"), "40202");
        assert_eq!(normalize_location("UNKNOWN.0"), "UNKNOWN.0");
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        match load_and_preprocess_data(&path) {
            Err(DataError::FileNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn loads_from_disk_without_touching_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let text = format!("{HEADER}\n1,ELM,40204,2019-07-01,A,2019-09-01,1000,ACME LLC\n");
        file.write_all(text.as_bytes()).unwrap();

        let dataset = load_and_preprocess_data(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), text);
    }
}
