//! Error taxonomy for loading, extracting and rendering.
//!
//! Coercion of non-numeric count cells is *not* an error: those cells become `0`.

use thiserror::Error;

/// Everything that can go wrong between reading a table and emitting a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The table could not be read or parsed (missing file, ragged rows, bad UTF-8…).
    #[error("failed to load table: {0}")]
    Load(#[from] csv::Error),

    /// Plain I/O failure while writing output or reading configuration.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of configuration or exported data failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table has a header but no data rows.
    #[error("dataset is empty: no data rows found")]
    EmptyDataset,

    /// The configured year column is not part of the header.
    #[error("year column `{0}` not found in header")]
    MissingYearColumn(String),

    /// A year cell could not be parsed as an integer (row is 1-based, header excluded).
    #[error("malformed year `{value}` in data row {row}")]
    MalformedYear { row: usize, value: String },

    /// A toggle referenced a category that the dataset does not have.
    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    /// Chart configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The drawing backend reported an error.
    #[error("render error: {0}")]
    Render(String),

    /// The renderer is poisoned: an earlier `recompute` panicked before finishing, so the
    /// retained scene may be half-updated. Not reachable through normal `&mut` use.
    #[error("renderer is poisoned: a previous recompute did not finish")]
    Reentrant,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ChartError>;
