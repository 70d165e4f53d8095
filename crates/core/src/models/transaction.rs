use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use super::validation;

/// Direction of a cash-flow record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionAction {
    /// Money going out
    Expense,
    /// Money coming in
    Income,
}

impl std::fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionAction::Expense => write!(f, "expense"),
            TransactionAction::Income => write!(f, "income"),
        }
    }
}

/// An expense or income row from the `transactions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,

    #[serde(default)]
    pub description: String,

    /// Always positive; the direction comes from `action`
    pub amount: f64,

    /// ISO currency code, uppercased (e.g., "ARS", "USD")
    pub currency: String,

    pub category: String,

    /// Daily granularity
    pub date: NaiveDate,

    pub action: TransactionAction,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.action == TransactionAction::Expense
    }

    pub fn is_income(&self) -> bool {
        self.action == TransactionAction::Income
    }
}

/// Form payload for a new transaction (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub date: NaiveDate,
    pub action: TransactionAction,
}

impl NewTransaction {
    /// Validate and normalize the payload (trimmed text, uppercased currency).
    pub fn validate(self) -> Result<Self, CoreError> {
        validation::positive("amount", self.amount)?;
        Ok(Self {
            description: self.description.trim().to_string(),
            currency: validation::currency_code("currency", &self.currency)?,
            category: validation::required("category", &self.category)?,
            ..self
        })
    }

    /// Attach an id, producing the stored record.
    pub fn into_record(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            currency: self.currency,
            category: self.category,
            date: self.date,
            action: self.action,
        }
    }
}
