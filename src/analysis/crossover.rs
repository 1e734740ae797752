// src/analysis/crossover.rs
use crate::analysis::indicators::{self, FAST_WINDOW, SLOW_WINDOW};
use crate::domain::errors::{AnalysisError, AnalysisResult};
use crate::domain::models::{CrossKind, CrossSignal, MovingAveragePair, PriceSeries, Trend};

/// Result of evaluating one symbol's series
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub current: MovingAveragePair,
    /// `None` when the series has no bar before the first full slow window
    pub previous: Option<MovingAveragePair>,
    pub signal: Option<CrossSignal>,
}

impl Evaluation {
    pub fn trend(&self) -> Trend {
        Trend::from_pair(&self.current)
    }
}

/// Golden/death cross detector over a fast and a slow SMA
#[derive(Debug, Clone)]
pub struct CrossoverDetector {
    fast_period: usize,
    slow_period: usize,
}

impl Default for CrossoverDetector {
    fn default() -> Self {
        Self::new(FAST_WINDOW, SLOW_WINDOW)
    }
}

impl CrossoverDetector {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
        }
    }

    /// Compare the averages on the latest day against the prior day.
    pub fn evaluate(&self, series: &PriceSeries) -> AnalysisResult<Evaluation> {
        let prices = series.close_prices();

        let current =
            indicators::moving_average_pair(&prices, self.fast_period, self.slow_period, 0)?;
        let previous = self.pair_at(&prices, 1)?;

        let signal = match (previous, series.latest()) {
            (Some(previous), Some(latest)) => {
                let prior = self.settled_trend(&prices, &previous)?;
                prior
                    .and_then(|prior| detect_cross(prior, Trend::from_pair(&current)))
                    .map(|kind| CrossSignal {
                        symbol: series.symbol.clone(),
                        kind,
                        date: latest.date,
                        close: latest.close,
                        current,
                        previous,
                    })
            }
            _ => None,
        };

        Ok(Evaluation {
            current,
            previous,
            signal,
        })
    }

    /// Averages `offset` days back, `None` once the series runs out
    fn pair_at(&self, prices: &[f64], offset: usize) -> AnalysisResult<Option<MovingAveragePair>> {
        match indicators::moving_average_pair(prices, self.fast_period, self.slow_period, offset) {
            Ok(pair) => Ok(Some(pair)),
            Err(AnalysisError::InsufficientData { .. }) if offset > 0 => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Last non-`Equal` trend before the latest day.
    ///
    /// Days where the averages touch are skipped so that above, equal, above
    /// is not reported as a cross. `None` if every earlier day is `Equal`.
    fn settled_trend(
        &self,
        prices: &[f64],
        previous: &MovingAveragePair,
    ) -> AnalysisResult<Option<Trend>> {
        let mut trend = Trend::from_pair(previous);
        let mut offset = 2;

        while trend == Trend::Equal {
            match self.pair_at(prices, offset)? {
                Some(pair) => trend = Trend::from_pair(&pair),
                None => return Ok(None),
            }
            offset += 1;
        }

        Ok(Some(trend))
    }
}

/// Cross kind when the leading average changed.
///
/// Landing on `Equal` is a touch, not a cross.
pub fn detect_cross(prior: Trend, current: Trend) -> Option<CrossKind> {
    if prior == current {
        return None;
    }

    match current {
        Trend::FiftyAbove => Some(CrossKind::Golden),
        Trend::FiftyBelow => Some(CrossKind::Death),
        Trend::Equal => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::models::PriceBar;
    use chrono::NaiveDate;

    pub(crate) fn series_from(symbol: &str, closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let mut series = PriceSeries::new(symbol);
        for (i, close) in closes.iter().enumerate() {
            series.add_bar(PriceBar {
                date: start + chrono::Duration::days(i as i64),
                close: *close,
            });
        }
        series
    }

    /// Falling prices, then a late rally large enough to lift the 50-day
    /// average over the 200-day on the very last bar.
    pub(crate) fn golden_cross_closes() -> Vec<f64> {
        let mut closes: Vec<f64> = (0..200).map(|i| 200.0 - i as f64 * 0.5).collect();
        // fast - slow on the prior day
        let before = cross_gap(&closes);
        assert!(before < 0.0);
        closes.push(closes[closes.len() - 1] + (-before + 1.0) * 50.0 * 4.0);
        closes
    }

    /// The golden cross series mirrored inside its own price range, so every
    /// close stays positive and the averages swap sides.
    pub(crate) fn death_cross_closes() -> Vec<f64> {
        let closes = golden_cross_closes();
        let high = closes.iter().cloned().fold(f64::MIN, f64::max);
        let low = closes.iter().cloned().fold(f64::MAX, f64::min);
        closes.iter().map(|c| high + low - c).collect()
    }

    /// Flat at 100 with the last three closes set. With a flat base,
    /// 4 * sum(last 50) - sum(last 200) moves by 3 per unit above 100 inside
    /// the fast window, so `[101, 99, x]` gives above, equal, then the sign of
    /// `x - 100` on the last three days.
    fn touch_closes(last_three: [f64; 3]) -> Vec<f64> {
        let mut closes = vec![100.0; 199];
        closes.extend_from_slice(&last_three);
        closes
    }

    /// Steadily rising prices: 50-day stays above the 200-day.
    pub(crate) fn no_cross_closes() -> Vec<f64> {
        (0..260).map(|i| 100.0 + i as f64).collect()
    }

    fn cross_gap(closes: &[f64]) -> f64 {
        let pair = indicators::moving_average_pair(closes, FAST_WINDOW, SLOW_WINDOW, 0).unwrap();
        pair.fast - pair.slow
    }

    #[test]
    fn test_golden_cross() {
        let series = series_from("AAPL", &golden_cross_closes());
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        let signal = evaluation.signal.expect("golden cross");
        assert_eq!(signal.kind, CrossKind::Golden);
        assert_eq!(signal.symbol, "AAPL");
        assert_eq!(Trend::from_pair(&signal.previous), Trend::FiftyBelow);
        assert_eq!(Trend::from_pair(&signal.current), Trend::FiftyAbove);
        assert_eq!(signal.date, series.latest().unwrap().date);
    }

    #[test]
    fn test_death_cross() {
        let series = series_from("MSFT", &death_cross_closes());
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        assert_eq!(evaluation.trend(), Trend::FiftyBelow);
        assert_eq!(evaluation.signal.map(|s| s.kind), Some(CrossKind::Death));
    }

    #[test]
    fn test_same_ordering_does_not_fire() {
        let series = series_from("MSFT", &no_cross_closes());
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        assert_eq!(evaluation.trend(), Trend::FiftyAbove);
        assert!(evaluation.previous.is_some());
        assert!(evaluation.signal.is_none());
    }

    #[test]
    fn test_insufficient_history() {
        let series = series_from("NEW", &[10.0; 150]);
        assert_eq!(
            CrossoverDetector::default().evaluate(&series),
            Err(AnalysisError::InsufficientData {
                needed: 200,
                available: 150
            })
        );
    }

    #[test]
    fn test_exactly_slow_window_of_history() {
        let series = series_from("IPO", &no_cross_closes()[..200]);
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        assert!(evaluation.previous.is_none());
        assert!(evaluation.signal.is_none());
        assert_eq!(evaluation.trend(), Trend::FiftyAbove);
    }

    #[test]
    fn test_death_cross_fixture_prices_are_positive() {
        assert!(death_cross_closes().iter().all(|c| *c > 0.0));
    }

    #[test]
    fn test_touch_then_same_side_does_not_fire() {
        let closes = touch_closes([101.0, 99.0, 101.0]);
        let prices = &closes;

        let trends: Vec<Trend> = (0..3)
            .rev()
            .map(|offset| {
                let pair =
                    indicators::moving_average_pair(prices, FAST_WINDOW, SLOW_WINDOW, offset)
                        .unwrap();
                Trend::from_pair(&pair)
            })
            .collect();
        assert_eq!(
            trends,
            vec![Trend::FiftyAbove, Trend::Equal, Trend::FiftyAbove]
        );

        let evaluation = CrossoverDetector::default()
            .evaluate(&series_from("AAPL", &closes))
            .unwrap();
        assert!(evaluation.signal.is_none());
    }

    #[test]
    fn test_touch_then_other_side_fires() {
        let series = series_from("AAPL", &touch_closes([101.0, 99.0, 99.0]));
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        let signal = evaluation.signal.expect("death cross");
        assert_eq!(signal.kind, CrossKind::Death);
        assert_eq!(Trend::from_pair(&signal.previous), Trend::Equal);
    }

    #[test]
    fn test_golden_cross_through_touch() {
        let series = series_from("AAPL", &touch_closes([99.0, 101.0, 101.0]));
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        assert_eq!(evaluation.signal.map(|s| s.kind), Some(CrossKind::Golden));
    }

    #[test]
    fn test_flat_history_never_fires() {
        let series = series_from("FLAT", &touch_closes([100.0, 100.0, 101.0]));
        let evaluation = CrossoverDetector::default().evaluate(&series).unwrap();

        assert_eq!(evaluation.trend(), Trend::FiftyAbove);
        assert!(evaluation.signal.is_none());
    }

    #[test]
    fn test_detect_cross_transitions() {
        use Trend::{Equal, FiftyAbove, FiftyBelow};

        assert_eq!(detect_cross(FiftyBelow, FiftyAbove), Some(CrossKind::Golden));
        assert_eq!(detect_cross(FiftyAbove, FiftyBelow), Some(CrossKind::Death));
        assert_eq!(detect_cross(FiftyAbove, Equal), None);
        assert_eq!(detect_cross(FiftyBelow, Equal), None);
        assert_eq!(detect_cross(FiftyAbove, FiftyAbove), None);
        assert_eq!(detect_cross(FiftyBelow, FiftyBelow), None);
    }
}
