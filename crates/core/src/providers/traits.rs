use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::quote::{ExchangeRate, Market, PricePoint, Quote};

/// Abstraction over market-data APIs that quote individual symbols.
///
/// Each upstream (CoinCap, Yahoo Finance) implements this trait. If an API
/// stops working or changes, only that one implementation is replaced.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which markets this provider can quote.
    fn supported_markets(&self) -> Vec<Market>;

    /// Latest price of a symbol.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, CoreError>;

    /// Daily closing prices between `from` and `to` (inclusive), sorted by date.
    async fn get_price_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}

/// Abstraction over APIs listing exchange rates (buy/sell per exchange house).
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// The full current listing.
    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, CoreError>;
}
