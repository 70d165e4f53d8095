use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which kind of market a symbol is quoted on.
/// Determines which quote provider to use for fetching market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Cryptocurrencies (BTC, ETH, etc.): uses CoinCap API
    Crypto,
    /// Stocks / equities / CEDEARs (AAPL, MELI, etc.): uses Yahoo Finance
    Stock,
}

impl Market {
    /// Map a user-entered investment category onto a market, if it has one.
    ///
    /// Categories are free text in both English and Spanish ("Cripto",
    /// "Acciones", "CEDEAR"). Fixed-term deposits and the like have no quote.
    pub fn from_category(category: &str) -> Option<Self> {
        let c = category.trim().to_lowercase();
        if c.contains("crypto") || c.contains("cripto") {
            Some(Market::Crypto)
        } else if ["stock", "accion", "acción", "cedear", "etf", "equity", "share"]
            .iter()
            .any(|k| c.contains(k))
        {
            Some(Market::Stock)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Crypto => write!(f, "crypto"),
            Market::Stock => write!(f, "stock"),
        }
    }
}

/// Where a piece of market data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Fetched from an upstream API
    Live,
    /// Hard-coded substitute used when every provider failed
    Mock,
}

/// Latest price of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Uppercased ticker
    pub symbol: String,
    pub market: Market,
    pub price: f64,
    pub currency: String,

    /// Change versus the previous close / 24h ago, in percent, when known
    pub change_pct: Option<f64>,

    pub as_of: DateTime<Utc>,
    pub source: QuoteSource,
}

/// A single price data point (date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// One row of the regional exchange-rate listing (e.g., "Blue", "Oficial").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Display name of the rate
    pub name: String,

    /// Short identifier of the exchange house / market
    pub house: String,

    /// Currency being priced (e.g., "USD")
    pub currency: String,

    /// Currency the price is expressed in (e.g., "ARS")
    pub quote_currency: String,

    pub buy: Option<f64>,
    pub sell: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The full exchange listing plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeListing {
    pub rates: Vec<ExchangeRate>,
    pub provider: String,
    pub source: QuoteSource,
}
