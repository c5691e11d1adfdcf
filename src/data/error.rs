use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A row that could not be turned into a [`Record`](super::model::Record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line in the CSV file (the header is line 1).
    pub line: usize,
    pub column: String,
    pub value: String,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column '{}': {} (value: '{}')",
            self.line, self.column, self.message, self.value
        )
    }
}

/// Errors produced by the data layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("CSV is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("{} unparseable row(s), first: {}", errors.len(), first_error(errors))]
    Parse { errors: Vec<RowError> },

    #[error("cannot compute metrics over an empty dataset")]
    EmptyDataset,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn first_error(errors: &[RowError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "<none>".to_string())
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;
