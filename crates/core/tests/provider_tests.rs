// ═══════════════════════════════════════════════════════════════════
// Provider Tests: Registry, MarketService fallback, mock data,
// CoinCap symbol resolution
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use finmate_core::errors::CoreError;
use finmate_core::models::investment::{InvestmentOperation, TradeAction};
use finmate_core::models::quote::{ExchangeRate, Market, PricePoint, Quote, QuoteSource};
use finmate_core::providers::coincap::CoinCapProvider;
use finmate_core::providers::mock;
use finmate_core::providers::registry::ProviderRegistry;
use finmate_core::providers::traits::{ExchangeRateProvider, QuoteProvider};
use finmate_core::services::market_service::MarketService;
use finmate_core::services::position_service::PositionService;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: Mock Providers
// ═══════════════════════════════════════════════════════════════════

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Quotes every symbol at a fixed price and counts calls.
struct FixedProvider {
    name: String,
    markets: Vec<Market>,
    price: f64,
    currency: String,
    calls: Arc<AtomicUsize>,
}

impl FixedProvider {
    fn new(name: &str, markets: Vec<Market>, price: f64) -> Self {
        Self {
            name: name.to_string(),
            markets,
            price,
            currency: "USD".to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn in_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }
}

#[async_trait]
impl QuoteProvider for FixedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_markets(&self) -> Vec<Market> {
        self.markets.clone()
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Quote {
            symbol: symbol.to_uppercase(),
            market: self.markets[0],
            price: self.price,
            currency: self.currency.clone(),
            change_pct: None,
            as_of: Utc::now(),
            source: QuoteSource::Live,
        })
    }

    async fn get_price_history(
        &self,
        _symbol: &str,
        from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        Ok(vec![PricePoint { date: from, price: self.price }])
    }
}

/// A provider that always fails.
struct FailingProvider {
    markets: Vec<Market>,
}

#[async_trait]
impl QuoteProvider for FailingProvider {
    fn name(&self) -> &str {
        "Failing"
    }

    fn supported_markets(&self) -> Vec<Market> {
        self.markets.clone()
    }

    async fn get_quote(&self, _symbol: &str) -> Result<Quote, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn get_price_history(
        &self,
        _symbol: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

struct FailingRates;

#[async_trait]
impl ExchangeRateProvider for FailingRates {
    fn name(&self) -> &str {
        "FailingRates"
    }

    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, CoreError> {
        Err(CoreError::api("FailingRates", "HTTP 503"))
    }
}

struct StaticRates;

#[async_trait]
impl ExchangeRateProvider for StaticRates {
    fn name(&self) -> &str {
        "StaticRates"
    }

    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, CoreError> {
        Ok(vec![ExchangeRate {
            name: "Oficial".into(),
            house: "oficial".into(),
            currency: "USD".into(),
            quote_currency: "ARS".into(),
            buy: Some(1000.0),
            sell: Some(1050.0),
            updated_at: None,
        }])
    }
}

fn service(quotes: Vec<Box<dyn QuoteProvider>>, rates: Vec<Box<dyn ExchangeRateProvider>>) -> MarketService {
    let mut registry = ProviderRegistry::new();
    for q in quotes {
        registry.register_quotes(q);
    }
    for r in rates {
        registry.register_rates(r);
    }
    MarketService::new(registry)
}

fn investment(symbol: &str, category: &str, currency: &str) -> InvestmentOperation {
    InvestmentOperation {
        id: Uuid::new_v4(),
        date: date(2025, 1, 1),
        action: TradeAction::Buy,
        category: category.into(),
        symbol: symbol.into(),
        platform: "Broker".into(),
        amount: 2.0,
        price: 100.0,
        currency: currency.into(),
        description: String::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn empty_registry_has_no_providers() {
        let registry = ProviderRegistry::new();
        assert!(!registry.has_provider_for(Market::Crypto));
        assert!(registry.get_providers_for(Market::Stock).is_empty());
        assert!(registry.rate_providers().is_empty());
    }

    #[test]
    fn providers_filtered_by_market_in_registration_order() {
        let mut registry = ProviderRegistry::new();
        registry.register_quotes(Box::new(FixedProvider::new("A", vec![Market::Stock], 1.0)));
        registry.register_quotes(Box::new(FixedProvider::new("B", vec![Market::Crypto], 1.0)));
        registry.register_quotes(Box::new(FixedProvider::new(
            "C",
            vec![Market::Stock, Market::Crypto],
            1.0,
        )));
        let names: Vec<&str> = registry
            .get_providers_for(Market::Stock)
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn coincap_resolves_common_symbols() {
        let provider = CoinCapProvider::new(None);
        assert_eq!(provider.resolve_id("BTC"), "bitcoin");
        assert_eq!(provider.resolve_id("eth"), "ethereum");
        assert_eq!(provider.resolve_id("NEWCOIN"), "newcoin");
        assert_eq!(provider.supported_markets(), vec![Market::Crypto]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// MarketService fallback
// ═══════════════════════════════════════════════════════════════════

mod fallback {
    use super::*;

    #[tokio::test]
    async fn first_provider_wins() {
        let svc = service(
            vec![
                Box::new(FixedProvider::new("Primary", vec![Market::Stock], 10.0)),
                Box::new(FixedProvider::new("Secondary", vec![Market::Stock], 20.0)),
            ],
            vec![],
        );
        let quote = svc.quote(Market::Stock, "aapl").await.unwrap();
        assert_eq!(quote.price, 10.0);
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.source, QuoteSource::Live);
    }

    #[tokio::test]
    async fn falls_through_to_next_provider() {
        let svc = service(
            vec![
                Box::new(FailingProvider { markets: vec![Market::Stock] }),
                Box::new(FixedProvider::new("Secondary", vec![Market::Stock], 20.0)),
            ],
            vec![],
        );
        assert_eq!(svc.quote(Market::Stock, "AAPL").await.unwrap().price, 20.0);
    }

    #[tokio::test]
    async fn invalid_price_is_skipped() {
        let svc = service(
            vec![
                Box::new(FixedProvider::new("Broken", vec![Market::Stock], f64::NAN)),
                Box::new(FixedProvider::new("Good", vec![Market::Stock], 5.0)),
            ],
            vec![],
        );
        assert_eq!(svc.quote(Market::Stock, "KO").await.unwrap().price, 5.0);
    }

    #[tokio::test]
    async fn all_failing_uses_mock_data() {
        let svc = service(vec![Box::new(FailingProvider { markets: vec![Market::Crypto] })], vec![]);
        let quote = svc.quote(Market::Crypto, "btc").await.unwrap();
        assert_eq!(quote.source, QuoteSource::Mock);
        assert_eq!(quote.price, mock::quote(Market::Crypto, "BTC").unwrap().price);
    }

    #[tokio::test]
    async fn no_provider_still_uses_mock_data() {
        let svc = service(vec![], vec![]);
        let quote = svc.quote(Market::Stock, "AAPL").await.unwrap();
        assert_eq!(quote.source, QuoteSource::Mock);
    }

    #[tokio::test]
    async fn unknown_symbol_without_providers_is_not_available() {
        let svc = service(vec![], vec![]);
        let err = svc.quote(Market::Stock, "NOPE123").await.unwrap_err();
        assert!(matches!(err, CoreError::QuoteNotAvailable { ref symbol, .. } if symbol == "NOPE123"));
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected() {
        let svc = service(vec![], vec![]);
        assert!(matches!(
            svc.quote(Market::Stock, "  ").await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn quotes_skip_unavailable_symbols() {
        let svc = service(vec![Box::new(FailingProvider { markets: vec![Market::Stock] })], vec![]);
        let symbols = vec!["AAPL".to_string(), "NOPE123".to_string(), "MSFT".to_string()];
        let quotes = svc.quotes(Market::Stock, &symbols).await;
        let got: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(got, vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn history_falls_back_to_flat_mock_series() {
        let svc = service(vec![Box::new(FailingProvider { markets: vec![Market::Stock] })], vec![]);
        let points = svc
            .price_history(Market::Stock, "AAPL", date(2025, 1, 1), date(2025, 1, 10))
            .await
            .unwrap();
        assert_eq!(points.len(), 10);
        assert!(points.iter().all(|p| p.price == points[0].price));
    }

    #[tokio::test]
    async fn history_uses_live_provider() {
        let svc = service(
            vec![Box::new(FixedProvider::new("Live", vec![Market::Stock], 42.0))],
            vec![],
        );
        let points = svc
            .price_history(Market::Stock, "AAPL", date(2025, 1, 1), date(2025, 1, 10))
            .await
            .unwrap();
        assert_eq!(points, vec![PricePoint { date: date(2025, 1, 1), price: 42.0 }]);
    }

    #[tokio::test]
    async fn history_rejects_inverted_range() {
        let svc = service(vec![], vec![]);
        let result = svc
            .price_history(Market::Stock, "AAPL", date(2025, 2, 1), date(2025, 1, 1))
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn exchange_rates_fall_back_in_order() {
        let svc = service(vec![], vec![Box::new(FailingRates), Box::new(StaticRates)]);
        let listing = svc.exchange_rates().await;
        assert_eq!(listing.provider, "StaticRates");
        assert_eq!(listing.source, QuoteSource::Live);
        assert_eq!(listing.rates.len(), 1);
    }

    #[tokio::test]
    async fn exchange_rates_mock_when_all_fail() {
        let svc = service(vec![], vec![Box::new(FailingRates)]);
        let listing = svc.exchange_rates().await;
        assert_eq!(listing.source, QuoteSource::Mock);
        assert_eq!(listing.rates, mock::exchange_rates());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Current prices for valuation
// ═══════════════════════════════════════════════════════════════════

mod current_prices {
    use super::*;

    #[tokio::test]
    async fn only_live_quotes_in_matching_currency() {
        let svc = service(
            vec![
                Box::new(FixedProvider::new("Stocks", vec![Market::Stock], 150.0)),
                Box::new(FailingProvider { markets: vec![Market::Crypto] }),
            ],
            vec![],
        );
        let ops = vec![
            investment("AAPL", "Acciones", "USD"),
            investment("GGAL", "Acciones", "ARS"),
            investment("BTC", "Cripto", "USD"),
            investment("PF30", "Plazo fijo", "ARS"),
        ];
        let open = PositionService::new().open_positions(&ops);
        let prices = svc.current_prices(&open).await;

        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(&("AAPL".to_string(), "USD".to_string())), Some(&150.0));
    }

    #[tokio::test]
    async fn duplicate_keys_are_fetched_once() {
        let provider = FixedProvider::new("Stocks", vec![Market::Stock], 10.0).in_currency("USD");
        let calls = Arc::clone(&provider.calls);
        let svc = service(vec![Box::new(provider)], vec![]);

        let mut other_platform = investment("AAPL", "Stock", "USD");
        other_platform.platform = "Other".into();
        let ops = vec![investment("AAPL", "Stock", "USD"), other_platform];
        let open = PositionService::new().open_positions(&ops);
        assert_eq!(open.len(), 2);

        let prices = svc.current_prices(&open).await;
        assert_eq!(prices.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Mock data
// ═══════════════════════════════════════════════════════════════════

mod mock_data {
    use super::*;

    #[test]
    fn known_symbols_are_tagged_mock() {
        let quote = mock::quote(Market::Stock, "aapl").unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.source, QuoteSource::Mock);
        assert_eq!(quote.currency, "USD");
    }

    #[test]
    fn unknown_symbol_has_no_mock() {
        assert!(mock::quote(Market::Crypto, "AAPL").is_none());
        assert!(mock::price_history(Market::Stock, "NOPE", date(2025, 1, 1), date(2025, 1, 2)).is_none());
    }

    #[test]
    fn dollar_listing_is_priced_in_pesos() {
        let rates = mock::exchange_rates();
        assert!(!rates.is_empty());
        assert!(rates.iter().all(|r| r.currency == "USD" && r.quote_currency == "ARS"));
        assert!(rates.iter().any(|r| r.house == "blue"));
    }
}
