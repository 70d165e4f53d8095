use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::ExchangeRate;
use super::traits::ExchangeRateProvider;

const BASE_URL: &str = "https://api.frankfurter.dev/v1";
const PROVIDER: &str = "Frankfurter";

/// Frankfurter API provider for official reference exchange rates.
///
/// - **Free**: No API key, no rate limits, open-source.
/// - **Source**: European Central Bank (ECB) data.
/// - **Endpoint**: `/latest?base={base}&symbols={list}`
///
/// Used as the fallback listing: it has no buy/sell spread, so both sides
/// carry the reference rate.
pub struct FrankfurterProvider {
    client: Client,
    base: String,
    symbols: Vec<String>,
}

impl FrankfurterProvider {
    /// USD priced in the major currencies the ECB publishes.
    pub fn new() -> Self {
        Self::with_pairs("USD", &["EUR", "GBP", "BRL", "JPY", "CHF"])
    }

    pub fn with_pairs(base: &str, symbols: &[&str]) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base: base.to_uppercase(),
            symbols: symbols.iter().map(|s| s.to_uppercase()).collect(),
        }
    }
}

impl Default for FrankfurterProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Frankfurter API response types ──────────────────────────────────

#[derive(Deserialize)]
struct RatesResponse {
    date: NaiveDate,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl ExchangeRateProvider for FrankfurterProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, CoreError> {
        let url = format!(
            "{BASE_URL}/latest?base={}&symbols={}",
            self.base,
            self.symbols.join(",")
        );

        let resp: RatesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse rates for {}: {e}", self.base)))?;

        let updated_at = Some(resp.date.and_time(NaiveTime::MIN).and_utc());

        // Keep the configured symbol order.
        let rates = self
            .symbols
            .iter()
            .filter_map(|target| {
                let rate = *resp.rates.get(target)?;
                Some(ExchangeRate {
                    name: format!("ECB {}/{target}", self.base),
                    house: "ecb".to_string(),
                    currency: self.base.clone(),
                    quote_currency: target.clone(),
                    buy: Some(rate),
                    sell: Some(rate),
                    updated_at,
                })
            })
            .collect();

        Ok(rates)
    }
}
