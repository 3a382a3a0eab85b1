//! Error types for the viewer

use std::path::PathBuf;

use error_stack::Report;
use rating_charts::ChartError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Chart-layer failure, rendered with its full report.
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("No snapshots for perf type `{0}`")]
    UnknownPerfType(String),
}

impl From<Report<ChartError>> for ViewerError {
    fn from(report: Report<ChartError>) -> Self {
        ViewerError::Dataset(format!("{report:?}"))
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
