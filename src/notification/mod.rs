// src/notification/mod.rs
pub mod smtp;

use crate::domain::errors::NotificationResult;
use crate::domain::models::{CrossKind, CrossSignal};
use async_trait::async_trait;

pub use smtp::SmtpNotifier;

/// Delivers crossover alerts
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, signal: &CrossSignal) -> NotificationResult<()>;
}

/// Plain-text alert ready to hand to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

pub fn compose_message(signal: &CrossSignal) -> AlertMessage {
    let direction = match signal.kind {
        CrossKind::Golden => "crossed above",
        CrossKind::Death => "crossed below",
    };
    let action = match signal.kind {
        CrossKind::Golden => "Buy",
        CrossKind::Death => "Sell",
    };

    let subject = format!("{}: {}", signal.kind, signal.symbol);

    let body = [
        format!(
            "{}: the 50-day moving average {} the 200-day moving average on {}.",
            signal.symbol, direction, signal.date
        ),
        String::new(),
        format!("Signal:       {} ({})", action, signal.kind),
        format!("Last close:   {:.2}", signal.close),
        format!(
            "Prior day:    50-day {:.2} / 200-day {:.2}",
            signal.previous.fast, signal.previous.slow
        ),
        format!(
            "Latest day:   50-day {:.2} / 200-day {:.2}",
            signal.current.fast, signal.current.slow
        ),
    ]
    .join("\n");

    AlertMessage { subject, body }
}
