pub mod mock;
pub mod registry;
pub mod traits;

// API provider implementations
pub mod coincap;
pub mod dolar_api;
pub mod frankfurter;
pub mod yahoo_finance;
