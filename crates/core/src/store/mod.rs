pub mod auth;
pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::forex::{ForexOperation, NewForexOperation};
use crate::models::investment::{InvestmentOperation, NewInvestment};
use crate::models::transaction::{NewTransaction, Transaction};
use crate::models::transfer::{NewTransfer, Transfer};

/// The four record tables of the hosted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Transactions,
    Investments,
    Forex,
    Transfers,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Transactions => "transactions",
            Table::Investments => "investments",
            Table::Forex => "forex",
            Table::Transfers => "transfers",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record storage for one authenticated user.
///
/// Records are create-and-read only. Lists come back oldest first.
/// Payloads are expected to be validated by the caller.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError>;
    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError>;

    async fn list_investments(&self) -> Result<Vec<InvestmentOperation>, CoreError>;
    async fn insert_investment(&self, new: NewInvestment) -> Result<InvestmentOperation, CoreError>;

    async fn list_forex(&self) -> Result<Vec<ForexOperation>, CoreError>;
    async fn insert_forex(&self, new: NewForexOperation) -> Result<ForexOperation, CoreError>;

    async fn list_transfers(&self) -> Result<Vec<Transfer>, CoreError>;
    async fn insert_transfer(&self, new: NewTransfer) -> Result<Transfer, CoreError>;
}

/// Opens a `Store` scoped to a user's access token.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, access_token: &str) -> Arc<dyn Store>;
}
