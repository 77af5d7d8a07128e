use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CalendarError(#[from] almanac_calendar::error::CalendarError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
