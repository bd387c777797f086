use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log format {0:?} (expected: text|json)")]
    InvalidFormat(String),
    #[error("global subscriber already installed")]
    AlreadyInitialized,
    #[error("subscriber init failed: {0}")]
    InitializationFailed(String),
    #[error("invalid log level directive {0:?}")]
    InvalidLogLevel(String),
}
