//! Hard-coded market data substituted when every live provider fails.
//!
//! Values are illustrative, not current. Everything returned here is tagged
//! `QuoteSource::Mock` so callers can tell it apart from live data.

use chrono::{NaiveDate, Utc};

use crate::models::quote::{ExchangeRate, Market, PricePoint, Quote, QuoteSource};

const CRYPTO: &[(&str, f64, f64)] = &[
    ("BTC", 65_000.0, 1.8),
    ("ETH", 3_400.0, 2.4),
    ("USDT", 1.0, 0.0),
    ("USDC", 1.0, 0.0),
    ("BNB", 580.0, -0.6),
    ("SOL", 150.0, 3.1),
    ("XRP", 0.52, -1.2),
    ("ADA", 0.45, 0.7),
    ("DOGE", 0.15, 4.5),
];

const STOCKS: &[(&str, f64, f64)] = &[
    ("AAPL", 190.0, 0.8),
    ("MSFT", 420.0, 0.4),
    ("GOOGL", 170.0, -0.3),
    ("AMZN", 180.0, 1.1),
    ("TSLA", 250.0, -2.2),
    ("NVDA", 120.0, 2.9),
    ("MELI", 1_800.0, 1.5),
    ("KO", 62.0, 0.1),
    ("SPY", 540.0, 0.5),
];

// (house, name, buy, sell)
const DOLLAR_RATES: &[(&str, &str, f64, f64)] = &[
    ("oficial", "Oficial", 950.0, 990.0),
    ("blue", "Blue", 1_180.0, 1_200.0),
    ("bolsa", "Bolsa", 1_190.0, 1_195.0),
    ("contadoconliqui", "Contado con liquidación", 1_200.0, 1_210.0),
    ("tarjeta", "Tarjeta", 1_520.0, 1_584.0),
    ("cripto", "Cripto", 1_215.0, 1_230.0),
];

fn table(market: Market) -> &'static [(&'static str, f64, f64)] {
    match market {
        Market::Crypto => CRYPTO,
        Market::Stock => STOCKS,
    }
}

/// A mock quote for a known symbol, `None` for anything else.
pub fn quote(market: Market, symbol: &str) -> Option<Quote> {
    let upper = symbol.to_uppercase();
    table(market)
        .iter()
        .find(|(s, _, _)| *s == upper)
        .map(|(s, price, change)| Quote {
            symbol: s.to_string(),
            market,
            price: *price,
            currency: "USD".to_string(),
            change_pct: Some(*change),
            as_of: Utc::now(),
            source: QuoteSource::Mock,
        })
}

/// A flat daily series at the mock price, `None` for unknown symbols.
pub fn price_history(
    market: Market,
    symbol: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<Vec<PricePoint>> {
    let price = quote(market, symbol)?.price;
    Some(
        from.iter_days()
            .take_while(|d| *d <= to)
            .map(|date| PricePoint { date, price })
            .collect(),
    )
}

/// The dollar listing with example values.
pub fn exchange_rates() -> Vec<ExchangeRate> {
    DOLLAR_RATES
        .iter()
        .map(|(house, name, buy, sell)| ExchangeRate {
            name: name.to_string(),
            house: house.to_string(),
            currency: "USD".to_string(),
            quote_currency: "ARS".to_string(),
            buy: Some(*buy),
            sell: Some(*sell),
            updated_at: None,
        })
        .collect()
}
