use chrono::NaiveDate;
use futures::future::join_all;

use crate::errors::CoreError;
use crate::models::position::{Position, PriceMap};
use crate::models::quote::{ExchangeListing, Market, PricePoint, Quote, QuoteSource};
use crate::providers::mock;
use crate::providers::registry::ProviderRegistry;
use crate::services::chart_service::MAX_CHART_RANGE_DAYS;

/// Fetches market data from the registered providers with fallback.
///
/// Providers are tried in registration order. If all of them fail, the
/// failure is logged and hard-coded mock data is substituted; callers see
/// `QuoteSource::Mock` rather than an error. Nothing is cached: every call
/// goes upstream.
pub struct MarketService {
    registry: ProviderRegistry,
}

impl MarketService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Check if at least one provider is available for a given market.
    pub fn has_provider_for(&self, market: Market) -> bool {
        self.registry.has_provider_for(market)
    }

    /// Get the names of all providers available for a given market.
    pub fn get_provider_names(&self, market: Market) -> Vec<String> {
        self.registry
            .get_providers_for(market)
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Latest quote for one symbol, live when possible, mock otherwise.
    ///
    /// Errors only when every provider failed *and* there is no mock entry.
    pub async fn quote(&self, market: Market, symbol: &str) -> Result<Quote, CoreError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::Validation("symbol must not be empty".into()));
        }

        match self.fetch_quote(market, &symbol).await {
            Ok(quote) => Ok(quote),
            Err(e) => {
                tracing::warn!(%market, %symbol, error = %e, "all quote providers failed, using mock data");
                mock::quote(market, &symbol).ok_or(CoreError::QuoteNotAvailable {
                    symbol,
                    market: market.to_string(),
                })
            }
        }
    }

    /// Quotes for several symbols, fetched concurrently.
    /// Symbols with neither a live nor a mock quote are skipped.
    pub async fn quotes(&self, market: Market, symbols: &[String]) -> Vec<Quote> {
        let results = join_all(symbols.iter().map(|s| self.quote(market, s))).await;
        results
            .into_iter()
            .filter_map(|r| match r {
                Ok(q) => Some(q),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping symbol without quote");
                    None
                }
            })
            .collect()
    }

    /// Daily closes for a symbol between `from` and `to` (inclusive).
    pub async fn price_history(
        &self,
        market: Market,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if from > to {
            return Err(CoreError::Validation(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        let range_days = (to - from).num_days();
        if range_days > MAX_CHART_RANGE_DAYS {
            return Err(CoreError::Validation(format!(
                "History range of {range_days} days exceeds maximum of {MAX_CHART_RANGE_DAYS} days (10 years)"
            )));
        }

        let symbol = symbol.trim().to_uppercase();
        let providers = self.registry.get_providers_for(market);
        let mut last_error = None;

        for provider in &providers {
            match provider.get_price_history(&symbol, from, to).await {
                Ok(points) if !points.is_empty() => return Ok(points),
                Ok(_) => {
                    last_error = Some(CoreError::api(
                        provider.name(),
                        format!("Empty history for {symbol}"),
                    ));
                }
                Err(e) => {
                    tracing::debug!(provider = provider.name(), error = %e, "history provider failed");
                    last_error = Some(e);
                }
            }
        }

        let error = last_error.unwrap_or_else(|| CoreError::NoProvider(market.to_string()));
        tracing::warn!(%market, %symbol, error = %error, "all history providers failed, using mock data");
        mock::price_history(market, &symbol, from, to).ok_or(CoreError::QuoteNotAvailable {
            symbol,
            market: market.to_string(),
        })
    }

    /// The regional exchange listing, falling back through providers, then mock data.
    pub async fn exchange_rates(&self) -> ExchangeListing {
        for provider in self.registry.rate_providers() {
            match provider.list_rates().await {
                Ok(rates) => {
                    return ExchangeListing {
                        rates,
                        provider: provider.name().to_string(),
                        source: QuoteSource::Live,
                    }
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "exchange listing failed");
                }
            }
        }

        tracing::warn!("all exchange listing providers failed, using mock data");
        ExchangeListing {
            rates: mock::exchange_rates(),
            provider: "mock".to_string(),
            source: QuoteSource::Mock,
        }
    }

    /// Live prices for the given positions, keyed by `(symbol, currency)`.
    ///
    /// Only positions whose category maps to a market are looked up, and only
    /// live quotes in the position's own currency are kept: valuing a holding
    /// at a mock price or in the wrong currency is worse than valuing it at cost.
    pub async fn current_prices(&self, positions: &[Position]) -> PriceMap {
        let mut wanted: Vec<(Market, String, String)> = positions
            .iter()
            .filter_map(|p| {
                let market = Market::from_category(&p.category)?;
                Some((market, p.key.symbol.clone(), p.key.currency.clone()))
            })
            .collect();
        wanted.sort();
        wanted.dedup();

        let lookups = wanted.iter().map(|(market, symbol, _)| self.fetch_quote(*market, symbol));
        let results = join_all(lookups).await;

        wanted
            .into_iter()
            .zip(results)
            .filter_map(|((_, symbol, currency), result)| match result {
                Ok(q) if q.currency.eq_ignore_ascii_case(&currency) => Some(((symbol, currency), q.price)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(%symbol, error = %e, "no live price, valuing at cost");
                    None
                }
            })
            .collect()
    }

    /// Try providers in registration order; validate that prices are finite and non-negative.
    async fn fetch_quote(&self, market: Market, symbol: &str) -> Result<Quote, CoreError> {
        let providers = self.registry.get_providers_for(market);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(market.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.get_quote(symbol).await {
                Ok(quote) if quote.price.is_finite() && quote.price >= 0.0 => return Ok(quote),
                Ok(quote) => {
                    last_error = Some(CoreError::api(
                        provider.name(),
                        format!(
                            "Invalid price returned for {symbol}: {} (must be finite and non-negative)",
                            quote.price
                        ),
                    ));
                }
                Err(e) => {
                    tracing::debug!(provider = provider.name(), error = %e, "quote provider failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(market.to_string())))
    }
}
