// src/market_data/provider.rs
use crate::domain::errors::MarketDataResult;
use crate::domain::models::PriceSeries;
use async_trait::async_trait;

/// Source of daily closing prices
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Get time-ordered daily closes for `symbol`, oldest first
    async fn fetch_daily_closes(&self, symbol: &str) -> MarketDataResult<PriceSeries>;
}
