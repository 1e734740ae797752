// src/analysis/indicators.rs
use crate::domain::errors::{AnalysisError, AnalysisResult};
use crate::domain::models::MovingAveragePair;
use ta::indicators::SimpleMovingAverage;
use ta::Next;

pub const FAST_WINDOW: usize = 50;
pub const SLOW_WINDOW: usize = 200;

/// Simple Moving Average of the last `window` closes
pub fn moving_average(prices: &[f64], window: usize) -> AnalysisResult<f64> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow(window));
    }
    if prices.len() < window {
        return Err(AnalysisError::InsufficientData {
            needed: window,
            available: prices.len(),
        });
    }

    let mut sma =
        SimpleMovingAverage::new(window).map_err(|_| AnalysisError::InvalidWindow(window))?;

    let mut average = 0.0;
    for price in &prices[prices.len() - window..] {
        average = sma.next(*price);
    }

    Ok(average)
}

/// Fast and slow averages for the day `offset` bars before the latest one.
///
/// An offset of 0 is the latest day, 1 the prior day.
pub fn moving_average_pair(
    prices: &[f64],
    fast: usize,
    slow: usize,
    offset: usize,
) -> AnalysisResult<MovingAveragePair> {
    let needed = fast.max(slow) + offset;
    if prices.len() < needed {
        return Err(AnalysisError::InsufficientData {
            needed,
            available: prices.len(),
        });
    }

    let window = &prices[..prices.len() - offset];
    Ok(MovingAveragePair {
        fast: moving_average(window, fast)?,
        slow: moving_average(window, slow)?,
    })
}
