use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A wallet's balance, derived entirely from the transfer history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub name: String,
    pub balance: f64,
    pub currency: String,

    /// Date of the most recent transfer touching this wallet
    pub last_update: NaiveDate,
}

/// Money lost moving between wallets, per currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFees {
    pub currency: String,
    pub total_fees: f64,
    pub transfer_count: usize,
}
