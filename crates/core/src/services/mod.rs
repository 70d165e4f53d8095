pub mod chart_service;
pub mod forex_service;
pub mod market_service;
pub mod metrics_service;
pub mod position_service;
pub mod wallet_service;
