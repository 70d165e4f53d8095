use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::{Market, PricePoint, Quote, QuoteSource};
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://api.coincap.io/v2";
const BASE_URL_KEYED: &str = "https://rest.coincap.io/v3";
const PROVIDER: &str = "CoinCap";

/// CoinCap API provider for cryptocurrency prices.
///
/// - **Free**: works without a key on the public v2 host; a key switches to
///   the v3 host with higher limits.
/// - **Endpoints**: `/assets/{id}`, `/assets/{id}/history`, `/assets?search={symbol}`
///
/// Note: CoinCap uses lowercase ids like "bitcoin", "ethereum".
/// We map common symbols (BTC → bitcoin) and dynamically resolve unknown ones.
pub struct CoinCapProvider {
    client: Client,
    base_url: &'static str,
    api_key: Option<String>,
    /// Map from uppercase symbol (BTC) to CoinCap asset id (bitcoin).
    /// Seeded with common mappings, extended at runtime via dynamic search.
    symbol_map: Mutex<HashMap<String, String>>,
}

impl CoinCapProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let common = [
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("USDT", "tether"),
            ("USDC", "usd-coin"),
            ("BNB", "binance-coin"),
            ("XRP", "xrp"),
            ("ADA", "cardano"),
            ("SOL", "solana"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("MATIC", "polygon"),
            ("LTC", "litecoin"),
            ("AVAX", "avalanche"),
            ("LINK", "chainlink"),
            ("UNI", "uniswap"),
            ("ATOM", "cosmos"),
            ("XLM", "stellar"),
            ("TRX", "tron"),
            ("DAI", "multi-collateral-dai"),
            ("SHIB", "shiba-inu"),
        ];
        let symbol_map: HashMap<String, String> = common
            .iter()
            .map(|(sym, id)| (sym.to_string(), id.to_string()))
            .collect();

        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: if api_key.is_some() { BASE_URL_KEYED } else { BASE_URL },
            api_key,
            symbol_map: Mutex::new(symbol_map),
        }
    }

    /// Resolve a symbol like "BTC" to a CoinCap ID like "bitcoin".
    /// Checks the static map only; unknown symbols fall back to their lowercase form.
    pub fn resolve_id(&self, symbol: &str) -> String {
        let upper = symbol.to_uppercase();
        let map = self.symbol_map.lock().unwrap_or_else(|e| e.into_inner());
        map.get(&upper)
            .cloned()
            .unwrap_or_else(|| symbol.to_lowercase())
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let req = self.client.get(url);
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    /// Dynamically resolve a symbol by searching the CoinCap API.
    /// Caches the result for future lookups.
    async fn resolve_id_dynamic(&self, symbol: &str) -> Result<String, CoreError> {
        let upper = symbol.to_uppercase();

        {
            let map = self.symbol_map.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(id) = map.get(&upper) {
                return Ok(id.clone());
            }
        }

        let url = format!("{}/assets?search={upper}&limit=5", self.base_url);
        let resp: AssetsSearchResponse = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to search for {upper}: {e}")))?;

        let id = resp
            .data
            .iter()
            .find(|a| a.symbol.to_uppercase() == upper)
            .map(|a| a.id.clone())
            .ok_or_else(|| CoreError::api(PROVIDER, format!("No CoinCap asset found for symbol {upper}")))?;

        tracing::debug!(symbol = %upper, id = %id, "resolved CoinCap asset id");
        {
            let mut map = self.symbol_map.lock().unwrap_or_else(|e| e.into_inner());
            map.insert(upper, id.clone());
        }

        Ok(id)
    }
}

impl Default for CoinCapProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetResponse {
    data: AssetData,
}

#[derive(Deserialize)]
struct AssetData {
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
    #[serde(rename = "changePercent24Hr")]
    change_percent_24h: Option<String>,
}

#[derive(Deserialize)]
struct HistoryResponse {
    data: Vec<HistoryPoint>,
}

#[derive(Deserialize)]
struct HistoryPoint {
    #[serde(rename = "priceUsd")]
    price_usd: String,
    time: i64, // unix timestamp in milliseconds
}

#[derive(Deserialize)]
struct AssetsSearchResponse {
    data: Vec<AssetSearchEntry>,
}

#[derive(Deserialize)]
struct AssetSearchEntry {
    id: String,
    symbol: String,
}

#[async_trait]
impl QuoteProvider for CoinCapProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_markets(&self) -> Vec<Market> {
        vec![Market::Crypto]
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let id = self.resolve_id_dynamic(symbol).await?;
        let url = format!("{}/assets/{id}", self.base_url);

        let resp: AssetResponse = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse response for {symbol}: {e}")))?;

        let price: f64 = resp
            .data
            .price_usd
            .ok_or_else(|| CoreError::api(PROVIDER, format!("No price data for {symbol}")))?
            .parse()
            .map_err(|e| CoreError::api(PROVIDER, format!("Invalid price format for {symbol}: {e}")))?;

        let change_pct = resp
            .data
            .change_percent_24h
            .and_then(|c| c.parse::<f64>().ok());

        // CoinCap quotes everything in USD.
        Ok(Quote {
            symbol: symbol.to_uppercase(),
            market: Market::Crypto,
            price,
            currency: "USD".to_string(),
            change_pct,
            as_of: Utc::now(),
            source: QuoteSource::Live,
        })
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let id = self.resolve_id_dynamic(symbol).await?;
        let start = from.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
        let end = to
            .succ_opt()
            .unwrap_or(to)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
            - 1;

        let url = format!(
            "{}/assets/{id}/history?interval=d1&start={start}&end={end}",
            self.base_url
        );

        let resp: HistoryResponse = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse history for {symbol}: {e}")))?;

        let mut points: Vec<PricePoint> = resp
            .data
            .iter()
            .filter_map(|p| {
                let price: f64 = p.price_usd.parse().ok()?;
                let dt = chrono::DateTime::from_timestamp_millis(p.time)?;
                Some(PricePoint {
                    date: dt.date_naive(),
                    price,
                })
            })
            .collect();

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}
