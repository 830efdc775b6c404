//! Error types for cellgraph core.

use thiserror::Error;

use cellgraph_engine::engine::FormulaFormatError;

/// Errors that can occur when editing, saving or loading a spreadsheet
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Invalid cell name: {0}")]
    InvalidName(String),

    #[error("Circular dependency detected")]
    CircularDependency,

    #[error("Invalid formula: {0}")]
    Format(#[from] FormulaFormatError),

    #[error("Failed to load spreadsheet: {message}")]
    Load { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpreadsheetError>;
