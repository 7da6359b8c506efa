use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while loading the indicator table at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("data source contains no rows")]
    Empty,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// A selection value outside what the loaded table can offer.
///
/// Never fatal: callers clamp the selection and log this as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelectionError {
    #[error("year cutoff {year} outside [{min}, {max}]")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("unknown countries: {}", .0.join(", "))]
    UnknownCountries(Vec<String>),
}
