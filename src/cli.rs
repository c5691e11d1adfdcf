//! Command-line parsing for the dashboard binary.

use std::path::PathBuf;

use clap::Parser;
use foreclosure_dashboard::config::{ConfigError, DashboardConfig};
use foreclosure_dashboard::data::{GroupBy, RowPolicy};

#[derive(Debug, Parser)]
#[command(
    name = "foreclosure-dashboard",
    version,
    about = "Interactive foreclosures reporting dashboard"
)]
pub struct Cli {
    /// Foreclosures CSV to open at startup.
    #[arg(long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// JSON config file (data path, column names, row policy, chart grouping).
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Chart x-axis dimension.
    #[arg(long, value_enum)]
    pub group_by: Option<GroupBy>,

    /// Refuse to load files with unparseable rows instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<DashboardConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)?,
            None => DashboardConfig::default(),
        };

        if let Some(path) = &self.data {
            config.data_path = path.clone();
        }
        if let Some(group_by) = self.group_by {
            config.group_by = group_by;
        }
        if self.strict {
            config.row_policy = RowPolicy::Strict;
        }
        Ok(config)
    }
}
