// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures fetching a symbol's history. Any of these skips the symbol.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Unknown or delisted symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("No data available for: {0}")]
    NoData(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data for analysis: need {needed} points, got {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Invalid moving average window: {0}")]
    InvalidWindow(usize),
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Invalid mail configuration: {0}")]
    Config(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type MarketDataResult<T> = Result<T, MarketDataError>;
pub type AnalysisResult<T> = Result<T, AnalysisError>;
pub type NotificationResult<T> = Result<T, NotificationError>;
