use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal too small (minimum 60x20)")]
    TerminalTooSmall,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
