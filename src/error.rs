//! Errors raised by the I/O layer around the projection engine
//!
//! The builders themselves never fail; these cover config loading and export.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PpaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown column `{column}` (available: {available})")]
    UnknownColumn { column: String, available: String },
}
