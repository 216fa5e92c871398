use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur while loading, analyzing, or charting a shipment log.
#[derive(Error, Debug)]
pub enum FreightError {
    #[error("File not found. Please ensure {} is present", .0.display())]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Chart error: {0}")]
    Chart(String),
}

impl From<calamine::Error> for FreightError {
    fn from(e: calamine::Error) -> Self {
        FreightError::Excel(e.to_string())
    }
}

impl From<toml::de::Error> for FreightError {
    fn from(e: toml::de::Error) -> Self {
        FreightError::Config(e.to_string())
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for FreightError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        FreightError::Chart(e.to_string())
    }
}
