// Library root - exports for testing

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use finmate_core::{
    models::settings::Settings,
    providers::registry::ProviderRegistry,
    services::market_service::MarketService,
    store::{
        auth::{Authenticator, SupabaseAuth},
        supabase::{SupabaseConfig, SupabaseConnector},
        StoreConnector,
    },
    FinMate,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
use middleware::auth::{require_session, AccessToken};

/// Shared by every request. Everything in it is immutable or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub market: Arc<MarketService>,
    pub connector: Arc<dyn StoreConnector>,
    pub auth: Arc<dyn Authenticator>,
}

impl AppState {
    /// Wire the hosted store, auth service and default market providers.
    pub fn from_config(config: &Config) -> Self {
        let settings = config.settings();
        let supabase =
            SupabaseConfig::from_settings(&config.supabase_url, &config.supabase_anon_key, &settings);
        let market = MarketService::new(ProviderRegistry::new_with_defaults(&settings));

        Self {
            settings: Arc::new(settings),
            market: Arc::new(market),
            connector: Arc::new(SupabaseConnector::new(supabase.clone())),
            auth: Arc::new(SupabaseAuth::new(supabase)),
        }
    }

    /// A core facade acting as the token's user.
    pub fn finmate(&self, token: &AccessToken) -> FinMate {
        FinMate::new(
            self.connector.connect(&token.0),
            Arc::clone(&self.market),
            (*self.settings).clone(),
        )
    }
}

/// All routes. User-data routes sit behind the session guard; market data,
/// login and health are public.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/crypto/prices", get(handlers::market::crypto_prices))
        .route("/api/stocks/quote", get(handlers::market::stock_quote))
        .route("/api/stocks/quotes", get(handlers::market::stock_quotes))
        .route("/api/stocks/history", get(handlers::market::stock_history))
        .route("/api/quotes", get(handlers::market::exchange_quotes))
        .route("/api/auth/login", post(handlers::auth::login));

    let protected = Router::new()
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/user", get(handlers::auth::current_user))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/api/transactions",
            get(handlers::records::list_transactions).post(handlers::records::create_transaction),
        )
        .route(
            "/api/investments",
            get(handlers::investments::list_investments)
                .post(handlers::investments::create_investment),
        )
        .route("/api/investments/positions", get(handlers::investments::open_positions))
        .route("/api/investments/closed", get(handlers::investments::closed_positions))
        .route("/api/investments/summary", get(handlers::investments::portfolio_summary))
        .route(
            "/api/forex",
            get(handlers::records::list_forex).post(handlers::records::create_forex),
        )
        .route("/api/forex/summary", get(handlers::records::forex_summary))
        .route(
            "/api/transfers",
            get(handlers::records::list_transfers).post(handlers::records::create_transfer),
        )
        .route("/api/wallets", get(handlers::records::wallet_balances))
        .route("/api/wallets/fees", get(handlers::records::transfer_fees))
        .route_layer(from_fn(require_session));

    public
        .merge(protected)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
