use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use super::validation;

/// A movement of money between two wallets, from the `transfers` table.
///
/// `initial_amount` leaves `wallet_from`; `final_amount` arrives in
/// `wallet_to`. The difference is whatever the move cost (fees, spreads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub date: NaiveDate,
    pub wallet_from: String,
    pub wallet_to: String,
    pub initial_amount: f64,
    pub final_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub description: String,
}

impl Transfer {
    /// Amount lost in transit (`initial_amount - final_amount`).
    pub fn fee(&self) -> f64 {
        self.initial_amount - self.final_amount
    }
}

/// Form payload for a new transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransfer {
    pub date: NaiveDate,
    pub wallet_from: String,
    pub wallet_to: String,
    pub initial_amount: f64,
    pub final_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub description: String,
}

impl NewTransfer {
    /// Validate and normalize the payload. Source and destination must differ.
    pub fn validate(self) -> Result<Self, CoreError> {
        validation::positive("initial_amount", self.initial_amount)?;
        validation::positive("final_amount", self.final_amount)?;
        let wallet_from = validation::required("wallet_from", &self.wallet_from)?;
        let wallet_to = validation::required("wallet_to", &self.wallet_to)?;
        if wallet_from.eq_ignore_ascii_case(&wallet_to) {
            return Err(CoreError::Validation(format!(
                "wallet_from and wallet_to must differ (both '{wallet_from}')"
            )));
        }
        Ok(Self {
            wallet_from,
            wallet_to,
            currency: validation::currency_code("currency", &self.currency)?,
            description: self.description.trim().to_string(),
            ..self
        })
    }

    pub fn into_record(self, id: Uuid) -> Transfer {
        Transfer {
            id,
            date: self.date,
            wallet_from: self.wallet_from,
            wallet_to: self.wallet_to,
            initial_amount: self.initial_amount,
            final_amount: self.final_amount,
            currency: self.currency,
            description: self.description,
        }
    }
}
