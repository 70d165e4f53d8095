use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use super::investment::TradeAction;
use super::validation;

/// A currency exchange row from the `forex` table.
///
/// `amount` units of `currency_to` were bought (or sold) at `price` units of
/// `currency_from` each; `total` is what changed hands in `currency_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexOperation {
    pub id: Uuid,
    pub date: NaiveDate,
    pub action: TradeAction,
    pub amount: f64,
    pub currency_from: String,
    pub currency_to: String,

    /// Exchange rate: `currency_from` per unit of `currency_to`
    pub price: f64,

    pub total: f64,

    #[serde(default)]
    pub description: String,
}

/// Form payload for a new exchange operation. `total` defaults to `amount * price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewForexOperation {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub amount: f64,
    pub currency_from: String,
    pub currency_to: String,
    pub price: f64,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl NewForexOperation {
    /// Validate and normalize the payload, filling in `total` when missing.
    pub fn validate(self) -> Result<Self, CoreError> {
        validation::positive("amount", self.amount)?;
        validation::positive("price", self.price)?;
        let currency_from = validation::currency_code("currency_from", &self.currency_from)?;
        let currency_to = validation::currency_code("currency_to", &self.currency_to)?;
        if currency_from == currency_to {
            return Err(CoreError::Validation(format!(
                "currency_from and currency_to must differ (both {currency_from})"
            )));
        }
        let total = match self.total {
            Some(total) => {
                validation::positive("total", total)?;
                total
            }
            None => self.amount * self.price,
        };
        Ok(Self {
            currency_from,
            currency_to,
            total: Some(total),
            description: self.description.trim().to_string(),
            ..self
        })
    }

    pub fn into_record(self, id: Uuid) -> ForexOperation {
        ForexOperation {
            id,
            date: self.date,
            action: self.action,
            amount: self.amount,
            total: self.total.unwrap_or(self.amount * self.price),
            currency_from: self.currency_from,
            currency_to: self.currency_to,
            price: self.price,
            description: self.description,
        }
    }
}

/// Aggregate of exchange operations for one pair and side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexSummary {
    pub currency_from: String,
    pub currency_to: String,
    pub action: TradeAction,

    /// Units of `currency_to` exchanged
    pub total_amount: f64,

    /// Units of `currency_from` paid or received
    pub total_paid: f64,

    /// Weighted average rate: `total_paid / total_amount`, 0 when nothing was exchanged
    pub average_rate: f64,

    pub operations: usize,
}
