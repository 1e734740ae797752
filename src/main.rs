// src/main.rs
use stock_watcher::config::Config;
use stock_watcher::domain::errors::AppResult;
use stock_watcher::market_data::YahooFinanceClient;
use stock_watcher::notification::SmtpNotifier;
use stock_watcher::watcher::run_once;
use stock_watcher::{schedule, watchlist::Watchlist};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting stock_watcher v{}", env!("CARGO_PKG_VERSION"));

    // Fail fast on missing inputs, before any network call
    let credentials = config.load_credentials()?;
    Watchlist::load(&config.files.watchlist_path)?;
    log::info!("Alerts will be sent from {}", credentials.account);

    let provider = YahooFinanceClient::new(&config.market_data.range);
    let notifier = SmtpNotifier::new(&config.mail, &credentials)?;

    let Some(daily_at) = config.schedule.daily_at else {
        run_once(&config, &provider, &notifier).await?;
        return Ok(());
    };

    log::info!("Scanning daily at {}", daily_at.format("%H:%M"));
    loop {
        schedule::wait_until(daily_at).await;

        // The watchlist is re-read each day; a missing file skips only that day
        if let Err(e) = run_once(&config, &provider, &notifier).await {
            log::error!("Daily scan failed: {}", e);
        }
    }
}
