// src/market_data/mod.rs
pub mod provider;
pub mod yahoo;

pub use provider::PriceHistoryProvider;
pub use yahoo::YahooFinanceClient;
