use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use time::OffsetDateTime;

use crate::errors::CoreError;
use crate::models::quote::{Market, PricePoint, Quote, QuoteSource};
use super::traits::QuoteProvider;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance API provider for stock/equity prices.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs, indices; `.BA` tickers for the
///   Buenos Aires exchange.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's public
/// endpoints. Prices come back in the listing's native currency; the
/// provider reports them in `currency` (USD unless configured otherwise).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    currency: String,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_currency("USD")
    }

    /// A provider that labels its quotes with `currency`.
    pub fn with_currency(currency: &str) -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to create connector: {e}")))?;
        Ok(Self {
            connector,
            currency: currency.to_uppercase(),
        })
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let month = time::Month::try_from(date.month() as u8)
            .map_err(|e| CoreError::api(PROVIDER, format!("Invalid month in {date}: {e}")))?;

        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| CoreError::api(PROVIDER, format!("Invalid date {date}: {e}")))?
            .with_hms(0, 0, 0)
            .map_err(|e| CoreError::api(PROVIDER, format!("Invalid time for {date}: {e}")))?
            .assume_utc();
        Ok(odt)
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_markets(&self) -> Vec<Market> {
        vec![Market::Stock]
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let ticker = symbol.to_uppercase();
        let resp = self
            .connector
            .get_latest_quotes(&ticker, "1d")
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to fetch latest quote for {ticker}: {e}")))?;

        let quotes = resp
            .quotes()
            .map_err(|e| CoreError::api(PROVIDER, format!("No quote data for {ticker}: {e}")))?;

        let last = quotes
            .last()
            .ok_or_else(|| CoreError::api(PROVIDER, format!("Empty quote list for {ticker}")))?;

        // Daily bars: the one before the last is the previous close.
        let change_pct = quotes
            .len()
            .checked_sub(2)
            .and_then(|i| quotes.get(i))
            .filter(|prev| prev.close > 0.0)
            .map(|prev| (last.close - prev.close) / prev.close * 100.0);

        Ok(Quote {
            symbol: ticker,
            market: Market::Stock,
            price: last.close,
            currency: self.currency.clone(),
            change_pct,
            as_of: chrono::DateTime::from_timestamp(last.timestamp as i64, 0).unwrap_or_else(Utc::now),
            source: QuoteSource::Live,
        })
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let ticker = symbol.to_uppercase();
        let start = Self::to_offset_datetime(from)?;
        let end = Self::to_offset_datetime(to + chrono::Duration::days(1))?; // inclusive end

        let resp = self
            .connector
            .get_quote_history(&ticker, start, end)
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to fetch history range for {ticker}: {e}")))?;

        let quotes = resp
            .quotes()
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse quotes for {ticker}: {e}")))?;

        let points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|q| {
                let date = Self::timestamp_to_naive_date(q.timestamp as i64)?;
                (date >= from && date <= to).then_some(PricePoint {
                    date,
                    price: q.close,
                })
            })
            .collect();

        Ok(points)
    }
}
