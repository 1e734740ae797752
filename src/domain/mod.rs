// src/domain/mod.rs
pub mod errors;
pub mod models;

// Re-export common types for convenience
pub use errors::{
    AnalysisError, AnalysisResult, AppError, AppResult, MarketDataError, MarketDataResult,
    NotificationError, NotificationResult,
};
pub use models::{CrossKind, CrossSignal, MovingAveragePair, PriceBar, PriceSeries, Trend};
