pub mod chart;
pub mod forex;
pub mod investment;
pub mod metrics;
pub mod period;
pub mod position;
pub mod preferences;
pub mod quote;
pub mod settings;
pub mod transaction;
pub mod transfer;
pub mod validation;
pub mod wallet;
