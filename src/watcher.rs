// src/watcher.rs
use crate::analysis::crossover::{CrossoverDetector, Evaluation};
use crate::config::Config;
use crate::domain::errors::{AppError, AppResult};
use crate::market_data::PriceHistoryProvider;
use crate::notification::Notifier;
use crate::watchlist::Watchlist;

/// Counts for one pass over the watchlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub evaluated: usize,
    pub skipped: usize,
    pub signals: usize,
    pub notification_failures: usize,
}

/// Outcome for a single symbol
#[derive(Debug)]
pub enum SymbolOutcome {
    /// Averages computed; holds the evaluation whether or not a cross fired
    Evaluated(Evaluation),
    /// Fetch or analysis failed, symbol left out of this run
    Skipped(AppError),
}

/// Fetches, evaluates and alerts for each watchlist symbol in order
pub struct StockWatcher<'a, P: PriceHistoryProvider, N: Notifier> {
    provider: &'a P,
    notifier: &'a N,
    detector: CrossoverDetector,
}

impl<'a, P: PriceHistoryProvider, N: Notifier> StockWatcher<'a, P, N> {
    pub fn new(provider: &'a P, notifier: &'a N) -> Self {
        Self {
            provider,
            notifier,
            detector: CrossoverDetector::default(),
        }
    }

    /// Scan every symbol. Per-symbol failures are logged and never abort the run.
    pub async fn run(&self, watchlist: &Watchlist) -> RunSummary {
        let mut summary = RunSummary::default();

        for symbol in watchlist.symbols() {
            log::info!("Analyzing {}...", symbol);

            let evaluation = match self.evaluate_symbol(symbol).await {
                SymbolOutcome::Evaluated(evaluation) => evaluation,
                SymbolOutcome::Skipped(e) => {
                    log::warn!("Skipping {}: {}", symbol, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.evaluated += 1;

            let signal = match evaluation.signal {
                Some(signal) => signal,
                None => {
                    log::info!(
                        "{}: no crossover ({}, 50-day {:.2} / 200-day {:.2})",
                        symbol,
                        evaluation.trend(),
                        evaluation.current.fast,
                        evaluation.current.slow
                    );
                    continue;
                }
            };

            log::info!("{}: {} on {}", symbol, signal.kind, signal.date);
            summary.signals += 1;

            if let Err(e) = self.notifier.notify(&signal).await {
                log::error!("Failed to send {} alert for {}: {}", signal.kind, symbol, e);
                summary.notification_failures += 1;
            }
        }

        log::info!(
            "Scan complete: {} evaluated, {} skipped, {} signals, {} failed notifications",
            summary.evaluated,
            summary.skipped,
            summary.signals,
            summary.notification_failures
        );

        summary
    }

    pub async fn evaluate_symbol(&self, symbol: &str) -> SymbolOutcome {
        let series = match self.provider.fetch_daily_closes(symbol).await {
            Ok(series) => series,
            Err(e) => return SymbolOutcome::Skipped(e.into()),
        };
        log::debug!("{}: {} daily closes", symbol, series.len());

        match self.detector.evaluate(&series) {
            Ok(evaluation) => SymbolOutcome::Evaluated(evaluation),
            Err(e) => SymbolOutcome::Skipped(e.into()),
        }
    }
}

/// Load the watchlist, then scan it. A missing watchlist fails before any
/// symbol is fetched.
pub async fn run_once<P: PriceHistoryProvider, N: Notifier>(
    config: &Config,
    provider: &P,
    notifier: &N,
) -> AppResult<RunSummary> {
    let watchlist = Watchlist::load(&config.files.watchlist_path)?;
    log::info!(
        "Loaded {} symbols from {}",
        watchlist.len(),
        config.files.watchlist_path.display()
    );

    Ok(StockWatcher::new(provider, notifier).run(&watchlist).await)
}
