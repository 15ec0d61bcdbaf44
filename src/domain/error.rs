use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// Source could not be fetched, decoded or parsed as delimited text
    ParseError(String),
    /// Every requested column name that the dataset does not carry
    UnknownColumn(Vec<String>),
    /// A statistic needs more usable values than the input provides
    InsufficientData {
        required: usize,
        found: usize,
        context: String,
    },
    ValidationError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::UnknownColumn(names) => {
                let quoted: Vec<String> = names.iter().map(|n| format!("\"{}\"", n)).collect();
                write!(f, "Unknown column(s): {}", quoted.join(", "))
            }
            AppError::InsufficientData {
                required,
                found,
                context,
            } => write!(
                f,
                "Not enough data for {}: need at least {}, found {}",
                context, required, found
            ),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Recoverable errors are reported as a validation or "not enough data"
    /// state; the rest abort the analysis request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::UnknownColumn(_) | AppError::InsufficientData { .. }
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ParseError(format!("Failed to fetch source: {}", err))
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ValidationError(format!("Invalid configuration: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
