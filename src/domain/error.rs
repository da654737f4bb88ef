// Startup error taxonomy
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("workbook not found: {}", .0.display())]
    WorkbookNotFound(PathBuf),

    #[error("cannot read workbook {}: {message}", .path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("sheet '{0}' is missing from the workbook")]
    MissingSheet(String),

    #[error("column '{column}' is missing from table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("table operation failed: {0}")]
    Frame(#[from] PolarsError),
}

impl DashboardError {
    pub fn missing_column(table: &str, column: &str) -> Self {
        Self::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
