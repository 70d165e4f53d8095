pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod store;

use chrono::NaiveDate;
use models::{
    chart::ChartDataPoint,
    forex::{ForexOperation, ForexSummary, NewForexOperation},
    investment::{InvestmentOperation, NewInvestment},
    metrics::DashboardSummary,
    period::Period,
    position::{ClosedPosition, PortfolioSummary, PositionValuation},
    quote::{ExchangeListing, Market, PricePoint, Quote},
    settings::Settings,
    transaction::{NewTransaction, Transaction},
    transfer::{NewTransfer, Transfer},
    wallet::{TransferFees, WalletBalance},
};
use services::{
    chart_service::ChartService, forex_service::ForexService, market_service::MarketService,
    metrics_service::MetricsService, position_service::PositionService,
    wallet_service::WalletService,
};
use std::sync::Arc;
use store::Store;

use errors::CoreError;

/// Main entry point for the FinMate core library.
///
/// Binds one user's record store to the shared market-data service and runs
/// every derivation (dashboard, positions, wallets) over freshly read
/// records. Cheap to build per request.
#[must_use]
pub struct FinMate {
    store: Arc<dyn Store>,
    market: Arc<MarketService>,
    settings: Settings,
    position_service: PositionService,
    wallet_service: WalletService,
    metrics_service: MetricsService,
    chart_service: ChartService,
    forex_service: ForexService,
}

impl std::fmt::Debug for FinMate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinMate")
            .field("settings", &self.settings)
            .field("crypto_providers", &self.market.get_provider_names(Market::Crypto))
            .field("stock_providers", &self.market.get_provider_names(Market::Stock))
            .finish()
    }
}

impl FinMate {
    pub fn new(store: Arc<dyn Store>, market: Arc<MarketService>, settings: Settings) -> Self {
        Self {
            store,
            market,
            settings,
            position_service: PositionService::new(),
            wallet_service: WalletService::new(),
            metrics_service: MetricsService::new(),
            chart_service: ChartService::new(),
            forex_service: ForexService::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn market(&self) -> &MarketService {
        &self.market
    }

    /// The requested currency, or the configured default when none was given.
    fn currency_or_default(&self, currency: Option<&str>) -> String {
        currency
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.settings.default_currency.as_str())
            .to_uppercase()
    }

    // ── Records ─────────────────────────────────────────────────────

    /// Validate and store an expense or income.
    pub async fn add_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError> {
        let record = self.store.insert_transaction(new.validate()?).await?;
        tracing::info!(id = %record.id, action = %record.action, "transaction added");
        Ok(record)
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.store.list_transactions().await
    }

    /// Validate and store a buy/sell investment operation.
    pub async fn add_investment(&self, new: NewInvestment) -> Result<InvestmentOperation, CoreError> {
        let record = self.store.insert_investment(new.validate()?).await?;
        tracing::info!(id = %record.id, symbol = %record.symbol, "investment added");
        Ok(record)
    }

    pub async fn list_investments(&self) -> Result<Vec<InvestmentOperation>, CoreError> {
        self.store.list_investments().await
    }

    /// Validate and store a currency exchange.
    pub async fn add_forex(&self, new: NewForexOperation) -> Result<ForexOperation, CoreError> {
        let record = self.store.insert_forex(new.validate()?).await?;
        tracing::info!(
            id = %record.id,
            pair = %format!("{}/{}", record.currency_from, record.currency_to),
            "forex operation added"
        );
        Ok(record)
    }

    pub async fn list_forex(&self) -> Result<Vec<ForexOperation>, CoreError> {
        self.store.list_forex().await
    }

    /// Validate and store a transfer between wallets.
    pub async fn add_transfer(&self, new: NewTransfer) -> Result<Transfer, CoreError> {
        let record = self.store.insert_transfer(new.validate()?).await?;
        tracing::info!(id = %record.id, "transfer added");
        Ok(record)
    }

    pub async fn list_transfers(&self) -> Result<Vec<Transfer>, CoreError> {
        self.store.list_transfers().await
    }

    // ── Dashboard & Charts ──────────────────────────────────────────

    /// Totals, deltas versus the previous month, category breakdowns and
    /// the daily series for one month. `None` currency means the default.
    pub async fn dashboard(
        &self,
        month: &Period,
        currency: Option<&str>,
    ) -> Result<DashboardSummary, CoreError> {
        let currency = self.currency_or_default(currency);
        let transactions = self.store.list_transactions().await?;
        self.metrics_service.dashboard(&transactions, month, &currency)
    }

    /// Zero-filled daily income/expense series over `period`.
    pub async fn daily_chart(
        &self,
        period: &Period,
        currency: Option<&str>,
    ) -> Result<Vec<ChartDataPoint>, CoreError> {
        let currency = self.currency_or_default(currency);
        let transactions = self.store.list_transactions().await?;
        self.chart_service.daily_series(&transactions, period, &currency)
    }

    /// One point per month of `year`.
    pub async fn monthly_chart(
        &self,
        year: i32,
        currency: Option<&str>,
    ) -> Result<Vec<ChartDataPoint>, CoreError> {
        let currency = self.currency_or_default(currency);
        let transactions = self.store.list_transactions().await?;
        Ok(self.chart_service.monthly_series(&transactions, year, &currency))
    }

    // ── Investments ─────────────────────────────────────────────────

    /// Open positions marked to market. Positions without a live price are valued at cost.
    pub async fn open_positions(&self) -> Result<Vec<PositionValuation>, CoreError> {
        let operations = self.store.list_investments().await?;
        let open = self.position_service.open_positions(&operations);
        let prices = self.market.current_prices(&open).await;
        tracing::debug!(positions = open.len(), priced = prices.len(), "valuing open positions");
        Ok(self.position_service.valuate(&open, &prices))
    }

    /// Every sell, paired with the first buy of its key.
    pub async fn closed_positions(&self) -> Result<Vec<ClosedPosition>, CoreError> {
        let operations = self.store.list_investments().await?;
        Ok(self.position_service.closed_positions(&operations))
    }

    /// Per-currency portfolio figures.
    pub async fn portfolio_summary(&self) -> Result<Vec<PortfolioSummary>, CoreError> {
        let operations = self.store.list_investments().await?;
        let open = self.position_service.open_positions(&operations);
        let prices = self.market.current_prices(&open).await;
        Ok(self.position_service.portfolio_summary(&operations, &prices))
    }

    // ── Wallets & Forex ─────────────────────────────────────────────

    pub async fn wallet_balances(&self) -> Result<Vec<WalletBalance>, CoreError> {
        let transfers = self.store.list_transfers().await?;
        Ok(self.wallet_service.wallet_balances(&transfers))
    }

    pub async fn transfer_fees(&self) -> Result<Vec<TransferFees>, CoreError> {
        let transfers = self.store.list_transfers().await?;
        Ok(self.wallet_service.transfer_fees(&transfers))
    }

    pub async fn forex_summary(&self) -> Result<Vec<ForexSummary>, CoreError> {
        let operations = self.store.list_forex().await?;
        Ok(self.forex_service.forex_summary(&operations))
    }

    // ── Market Data ─────────────────────────────────────────────────

    pub async fn quote(&self, market: Market, symbol: &str) -> Result<Quote, CoreError> {
        self.market.quote(market, symbol).await
    }

    pub async fn quotes(&self, market: Market, symbols: &[String]) -> Vec<Quote> {
        self.market.quotes(market, symbols).await
    }

    pub async fn price_history(
        &self,
        market: Market,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        self.market.price_history(market, symbol, from, to).await
    }

    pub async fn exchange_rates(&self) -> ExchangeListing {
        self.market.exchange_rates().await
    }
}
