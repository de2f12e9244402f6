use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a report run
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem error while reading inputs or writing the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV row or unparsable required cell
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// DataFrame construction or query failure
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Invalid JSON in a configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An input table file does not exist
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// A required column is absent from a loaded table
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    /// Filtering left nothing to aggregate or plot
    #[error("No data for {0}")]
    EmptyResult(String),

    /// Chart drawing failure
    #[error("Render error: {0}")]
    Render(String),

    /// PDF document assembly failure
    #[error("Document error: {0}")]
    Document(String),

    /// Configuration error (unknown property, invalid override file, ...)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ReportError::Render(err.to_string())
    }
}

/// Type alias for Results using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;
