use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use super::validation;

/// Side of an investment or currency-exchange operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// Buying / acquiring
    Buy,
    /// Selling / disposing
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

/// A buy/sell row from the `investments` table.
///
/// Unlike the price-less events of a holdings tracker, each operation records
/// the unit price it was executed at, so cost basis needs no market lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOperation {
    pub id: Uuid,
    pub date: NaiveDate,
    pub action: TradeAction,

    /// Free-form asset class as entered by the user (e.g., "Crypto", "Acciones", "CEDEAR")
    pub category: String,

    /// Ticker, uppercased (e.g., "BTC", "AAPL")
    pub symbol: String,

    /// Broker or exchange the operation was made on
    pub platform: String,

    /// Quantity of units (always positive)
    pub amount: f64,

    /// Unit price in `currency`
    pub price: f64,

    pub currency: String,

    #[serde(default)]
    pub description: String,
}

impl InvestmentOperation {
    /// Cash value of this leg (`amount * price`).
    pub fn total(&self) -> f64 {
        self.amount * self.price
    }
}

/// Form payload for a new investment operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestment {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub category: String,
    pub symbol: String,
    pub platform: String,
    pub amount: f64,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub description: String,
}

impl NewInvestment {
    /// Validate and normalize the payload (uppercased symbol and currency).
    pub fn validate(self) -> Result<Self, CoreError> {
        validation::positive("amount", self.amount)?;
        validation::positive("price", self.price)?;
        Ok(Self {
            category: validation::required("category", &self.category)?,
            symbol: validation::required("symbol", &self.symbol)?.to_uppercase(),
            platform: validation::required("platform", &self.platform)?,
            currency: validation::currency_code("currency", &self.currency)?,
            description: self.description.trim().to_string(),
            ..self
        })
    }

    pub fn into_record(self, id: Uuid) -> InvestmentOperation {
        InvestmentOperation {
            id,
            date: self.date,
            action: self.action,
            category: self.category,
            symbol: self.symbol,
            platform: self.platform,
            amount: self.amount,
            price: self.price,
            currency: self.currency,
            description: self.description,
        }
    }
}
