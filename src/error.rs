// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No extracted table carried the variable columns.
    #[error("no variable table found for topic '{topic}'")]
    EmptyResult { topic: String },

    #[error("file '{}' not found", .path.display())]
    InputMissing { path: PathBuf },

    #[error("output folder '{}' not found or not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("'{}' has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("'{}' is not a CSV or Excel file", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("{process} is not currently running")]
    NotRunning { process: String },

    #[error("cannot open value source: {0}")]
    Connect(String),

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("xlsx write: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("spreadsheet read: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

/// Outcome of a single failed value query. Never leaves the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("variable not found")]
    NotFound,
    #[error("query failed: {0}")]
    Failed(String),
}
