//! Dashboard configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, an optional
//! JSON file, then command-line flags (see `src/cli.rs`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{ColumnMap, GroupBy, LoadOptions, RowPolicy};

pub const DEFAULT_DATA_PATH: &str = "data/Louisville_Metro_KY_-_Property_Foreclosures.csv";
pub const DEFAULT_TITLE: &str = "Foreclosures in Louisville, KY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the dashboard needs to know before the first frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: ColumnMap,
    pub row_policy: RowPolicy,
    pub group_by: GroupBy,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            columns: ColumnMap::default(),
            row_policy: RowPolicy::default(),
            group_by: GroupBy::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            columns: self.columns.clone(),
            row_policy: self.row_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let cfg = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.group_by, GroupBy::FilingYear);
        assert_eq!(cfg.row_policy, RowPolicy::Skip);
    }

    #[test]
    fn partial_override() {
        let cfg = DashboardConfig::from_json_str(
            r#"{
                "data_path": "other.csv",
                "row_policy": "strict",
                "group_by": "filing_month",
                "columns": { "location": "ZipCode" }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.data_path, PathBuf::from("other.csv"));
        assert_eq!(cfg.row_policy, RowPolicy::Strict);
        assert_eq!(cfg.group_by, GroupBy::FilingMonth);
        assert_eq!(cfg.columns.location, "ZipCode");
        assert_eq!(cfg.columns.filing_date, "Action_Filed");
        assert_eq!(cfg.title, DEFAULT_TITLE);
    }

    #[test]
    fn unknown_group_by_is_rejected() {
        assert!(DashboardConfig::from_json_str(r#"{ "group_by": "purchaser" }"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "title": "Test" }"#).unwrap();
        assert_eq!(DashboardConfig::from_json_file(&path).unwrap().title, "Test");

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            DashboardConfig::from_json_file(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
