//! Crate-level error type and `Result` alias.
//! Separates usage errors raised by argument parsing, validation failures of
//! mutually-dependent flags, and I/O or parse failures while loading inputs.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid count in {path:?} at line {line}, column {column:?}: {value:?}")]
    Parse {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("Expected {expected} fields in {path:?} at line {line}, found {found}")]
    Shape {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Counts matrix shape error: {0}")]
    Matrix(#[from] ndarray::ShapeError),

    #[error("No records found in {path:?}")]
    EmptyFile { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flag combinations rejected after parsing and before any file is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Error: if -train is set both -labels/-l and -samples/-s must be set also. Exiting.")]
    TrainingInputs,

    #[error("Error: if -train is not set a destination (-d /path/to/output/) is required. Exiting.")]
    MissingDestination,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error when surfaced by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(e) => e.exit_code(),
            _ => 1,
        }
    }
}
