use crate::models::quote::Market;
use crate::models::settings::Settings;

use super::coincap::CoinCapProvider;
use super::dolar_api::DolarApiProvider;
use super::frankfurter::FrankfurterProvider;
use super::traits::{ExchangeRateProvider, QuoteProvider};
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of all available market-data providers.
///
/// Routes quote requests to the providers that support a `Market`, in
/// registration order. The first registered provider is the primary; later
/// ones are fallbacks.
pub struct ProviderRegistry {
    quote_providers: Vec<Box<dyn QuoteProvider>>,
    rate_providers: Vec<Box<dyn ExchangeRateProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            quote_providers: Vec::new(),
            rate_providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers pre-configured.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        // CoinCap: crypto, API key optional
        registry.register_quotes(Box::new(CoinCapProvider::new(
            settings.api_keys.get("coincap").cloned(),
        )));

        // Yahoo Finance: stocks, no API key needed
        match YahooFinanceProvider::new() {
            Ok(yahoo) => registry.register_quotes(Box::new(yahoo)),
            Err(e) => tracing::warn!("Yahoo Finance provider unavailable: {e}"),
        }

        // DolarApi: regional exchange listing (primary)
        registry.register_rates(Box::new(DolarApiProvider::new(&settings.exchange_api_url)));

        // Frankfurter: ECB reference rates (fallback)
        registry.register_rates(Box::new(FrankfurterProvider::new()));

        registry
    }

    /// Register a new quote provider.
    pub fn register_quotes(&mut self, provider: Box<dyn QuoteProvider>) {
        self.quote_providers.push(provider);
    }

    /// Register a new exchange-rate provider.
    pub fn register_rates(&mut self, provider: Box<dyn ExchangeRateProvider>) {
        self.rate_providers.push(provider);
    }

    /// Return ALL providers that quote the given market, ordered by registration priority.
    pub fn get_providers_for(&self, market: Market) -> Vec<&dyn QuoteProvider> {
        self.quote_providers
            .iter()
            .filter(|p| p.supported_markets().contains(&market))
            .map(|p| p.as_ref())
            .collect()
    }

    /// Exchange-rate providers in registration order.
    pub fn rate_providers(&self) -> Vec<&dyn ExchangeRateProvider> {
        self.rate_providers.iter().map(|p| p.as_ref()).collect()
    }

    pub fn has_provider_for(&self, market: Market) -> bool {
        self.quote_providers
            .iter()
            .any(|p| p.supported_markets().contains(&market))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
