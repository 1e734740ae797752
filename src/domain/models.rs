// src/domain/models.rs
use chrono::NaiveDate;
use std::fmt;

/// One trading day's close
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Time-ordered daily closes for a single symbol
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            bars: Vec::new(),
        }
    }

    pub fn add_bar(&mut self, bar: PriceBar) {
        self.bars.push(bar);
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn close_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

/// Fast (50-day) and slow (200-day) averages on the same day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAveragePair {
    pub fast: f64,
    pub slow: f64,
}

/// Which average currently leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    FiftyAbove,
    FiftyBelow,
    Equal,
}

impl Trend {
    pub fn from_pair(pair: &MovingAveragePair) -> Self {
        if pair.fast > pair.slow {
            Trend::FiftyAbove
        } else if pair.fast < pair.slow {
            Trend::FiftyBelow
        } else {
            Trend::Equal
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Trend::FiftyAbove => write!(f, "50-day above 200-day"),
            Trend::FiftyBelow => write!(f, "50-day below 200-day"),
            Trend::Equal => write!(f, "50-day equal to 200-day"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossKind {
    /// 50-day crossed above the 200-day
    Golden,
    /// 50-day crossed below the 200-day
    Death,
}

impl CrossKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossKind::Golden => "Golden cross",
            CrossKind::Death => "Death cross",
        }
    }
}

impl fmt::Display for CrossKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A crossover observed between the prior day and the latest day
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSignal {
    pub symbol: String,
    pub kind: CrossKind,
    pub date: NaiveDate,
    pub close: f64,
    pub current: MovingAveragePair,
    pub previous: MovingAveragePair,
}
