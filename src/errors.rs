use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing title")]
    MissingTitle,
    #[error("missing date")]
    MissingDate,
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("DECODE_FAILED: note {index}: {message}")]
    Decode { index: usize, message: String },
    #[error("VALIDATION_FAILED: note {index}: {source}")]
    Validation {
        index: usize,
        #[source]
        source: ValidationError,
    },
    #[error("IO_FAILURE: {0}")]
    Io(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("CONFIG_INVALID: {0}")]
    Config(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
