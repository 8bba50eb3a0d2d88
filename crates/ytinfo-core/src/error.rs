use thiserror::Error;

/// Top-level error type for ytinfo.
#[derive(Debug, Error)]
pub enum BotError {
    /// Error from a chat platform channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Error from a video metadata source.
    #[error("video source error: {0}")]
    Source(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Settings store error.
    #[error("store error: {0}")]
    Store(String),

    /// Translation loading or transform registration error.
    #[error("i18n error: {0}")]
    I18n(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
