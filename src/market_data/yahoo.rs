// src/market_data/yahoo.rs
use crate::domain::errors::{MarketDataError, MarketDataResult};
use crate::domain::models::{PriceBar, PriceSeries};
use crate::market_data::provider::PriceHistoryProvider;
use async_trait::async_trait;
use chrono::DateTime;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Request, StatusCode};
use hyper_tls::HttpsConnector;
use serde::Deserialize;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stock_watcher";

impl From<hyper::Error> for MarketDataError {
    fn from(err: hyper::Error) -> Self {
        MarketDataError::Request(err.to_string())
    }
}

/// Daily history from the Yahoo Finance chart endpoint
pub struct YahooFinanceClient {
    client: Client<HttpsConnector<HttpConnector>>,
    range: String,
}

impl YahooFinanceClient {
    /// `range` is a chart range such as "1y"
    pub fn new(range: &str) -> Self {
        let https = HttpsConnector::new();
        Self {
            client: Client::builder().build::<_, Body>(https),
            range: range.to_string(),
        }
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/{}?range={}&interval=1d&events=history",
            CHART_URL,
            urlencoding::encode(symbol),
            self.range
        )
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooFinanceClient {
    async fn fetch_daily_closes(&self, symbol: &str) -> MarketDataResult<PriceSeries> {
        let url = self.chart_url(symbol);
        log::debug!("GET {}", url);

        let request = Request::get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .body(Body::empty())
            .map_err(|e| MarketDataError::Request(format!("Invalid request for {}: {}", symbol, e)))?;

        let response = self.client.request(request).await?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await?;

        check_status(symbol, status)?;
        parse_chart(symbol, &body)
    }
}

/// Map the HTTP status before decoding.
///
/// Yahoo answers unknown symbols with 404 and a `chart.error` payload, so 404
/// is left to `parse_chart`.
fn check_status(symbol: &str, status: StatusCode) -> MarketDataResult<()> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(MarketDataError::RateLimit(symbol.to_string())),
        s if s.is_success() || s == StatusCode::NOT_FOUND => Ok(()),
        s => Err(MarketDataError::Request(format!(
            "HTTP {} fetching {}",
            s, symbol
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Decode a chart payload into daily closes. Days with a null close are dropped.
pub fn parse_chart(symbol: &str, body: &[u8]) -> MarketDataResult<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_slice(body).map_err(|e| {
        MarketDataError::InvalidFormat(format!("Chart payload for {}: {}", symbol, e))
    })?;

    if let Some(error) = envelope.chart.error {
        return Err(MarketDataError::UnknownSymbol(format!(
            "{} ({}: {})",
            symbol, error.code, error.description
        )));
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    if closes.len() != result.timestamp.len() {
        return Err(MarketDataError::InvalidFormat(format!(
            "{}: {} timestamps but {} closes",
            symbol,
            result.timestamp.len(),
            closes.len()
        )));
    }

    let mut series = PriceSeries::new(symbol);
    for (ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close else { continue };
        let date = DateTime::from_timestamp(*ts, 0)
            .ok_or_else(|| {
                MarketDataError::InvalidFormat(format!("Invalid timestamp for {}: {}", symbol, ts))
            })?
            .date_naive();
        series.add_bar(PriceBar { date, close });
    }

    if series.is_empty() {
        return Err(MarketDataError::NoData(symbol.to_string()));
    }

    series.bars.sort_by_key(|bar| bar.date);
    Ok(series)
}
