use thiserror::Error;

/// Date parsing and lunar table errors
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid lunar table: {0}")]
    InvalidLunarTable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
