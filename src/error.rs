//! Error handling for ODF reading, editing and writing.
//!
//! Provides tagged error types with field-level context for file access,
//! structural parsing and value validation failures, plus the non-fatal
//! warnings collected on a document while it is read or reconciled.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OdfError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed ODF document{}: {reason}", location(.block, .line))]
    MalformedDocument {
        reason: String,
        block: Option<String>,
        line: Option<usize>,
    },

    #[error("Invalid date-time for {field}: '{value}' (expected DD-MON-YYYY HH:MM:SS.ss)")]
    InvalidDateTime { field: String, value: String },

    #[error("Invalid numeric value for {field}: '{value}'")]
    InvalidNumeric { field: String, value: String },

    #[error("Invalid value for {field}: '{value}' (allowed: {})", .allowed.join(", "))]
    InvalidEnum {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid parameter code '{value}' (expected four uppercase letters, '_', two digits)")]
    InvalidCode { value: String },

    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Unknown field {key} in {block}")]
    UnknownField { block: String, key: String },

    #[error("Schema mismatch: expected {expected} columns, found {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Invariant violation: {which}")]
    InvariantViolation { which: String },

    #[error("{block} line {line}: {source}")]
    InBlock {
        block: String,
        line: usize,
        #[source]
        source: Box<OdfError>,
    },
}

fn location(block: &Option<String>, line: &Option<usize>) -> String {
    match (block, line) {
        (Some(block), Some(line)) => format!(" in {} at line {}", block, line),
        (Some(block), None) => format!(" in {}", block),
        (None, Some(line)) => format!(" at line {}", line),
        (None, None) => String::new(),
    }
}

impl OdfError {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a read error for a path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a write error for a path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Create a structural error with optional block and line context
    pub fn malformed(reason: impl Into<String>, block: Option<&str>, line: Option<usize>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
            block: block.map(str::to_string),
            line,
        }
    }

    pub fn invalid_datetime(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDateTime {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_numeric(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumeric {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_enum(field: impl Into<String>, value: impl Into<String>, allowed: &[&str]) -> Self {
        Self::InvalidEnum {
            field: field.into(),
            value: value.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn invalid_code(value: impl Into<String>) -> Self {
        Self::InvalidCode {
            value: value.into(),
        }
    }

    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    pub fn unknown_field(block: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownField {
            block: block.into(),
            key: key.into(),
        }
    }

    pub fn schema_mismatch(expected: usize, actual: usize) -> Self {
        Self::SchemaMismatch { expected, actual }
    }

    pub fn invariant_violation(which: impl Into<String>) -> Self {
        Self::InvariantViolation {
            which: which.into(),
        }
    }

    /// Attach block name and line number to an error raised inside a block
    pub fn in_block(self, block: impl Into<String>, line: usize) -> Self {
        Self::InBlock {
            block: block.into(),
            line,
            source: Box::new(self),
        }
    }

    /// The underlying error with any block context removed
    pub fn root(&self) -> &OdfError {
        match self {
            Self::InBlock { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, OdfError>;

/// Non-fatal findings collected while a document is read or reconciled
#[derive(Debug, Clone, PartialEq)]
pub enum OdfWarning {
    /// A `*_HEADER` block the codec does not understand; skipped on read
    UnknownHeader { name: String, line: usize },

    /// A key inside a known block that the block does not define
    UnknownField {
        block: String,
        key: String,
        line: usize,
    },

    /// A scalar key given more than once; the last value wins
    RepeatedScalar {
        block: String,
        key: String,
        line: usize,
    },

    /// General and polynomial calibration lists disagree on the shared counter
    CalibrationCountMismatch { general: usize, polynomial: usize },
}

impl fmt::Display for OdfWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHeader { name, line } => {
                write!(f, "Unknown header block {} at line {} was skipped", name, line)
            }
            Self::UnknownField { block, key, line } => {
                write!(f, "Unknown field {} in {} at line {} was ignored", key, block, line)
            }
            Self::RepeatedScalar { block, key, line } => {
                write!(f, "Field {} repeated in {} at line {}; last value kept", key, block, line)
            }
            Self::CalibrationCountMismatch {
                general,
                polynomial,
            } => write!(
                f,
                "NUM_CALIBRATION is shared by {} general and {} polynomial calibrations",
                general, polynomial
            ),
        }
    }
}
