use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid listing: {0}")]
    InvalidListing(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
