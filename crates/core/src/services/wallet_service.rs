use std::collections::BTreeMap;

use crate::models::transfer::Transfer;
use crate::models::wallet::{TransferFees, WalletBalance};

/// Rebuilds wallet balances from the transfer history.
///
/// Wallets are not stored anywhere: a wallet exists because a transfer
/// named it, and its balance is whatever the transfers add up to.
pub struct WalletService;

impl WalletService {
    pub fn new() -> Self {
        Self
    }

    /// Fold transfers, in date order, into per-(wallet, currency) balances.
    ///
    /// The source wallet loses `initial_amount`; the destination gains
    /// `final_amount`. Wallet names match ignoring ASCII case, the same rule
    /// transfer validation uses, and keep the first spelling seen. Sorted by
    /// wallet name, then currency.
    pub fn wallet_balances(&self, transfers: &[Transfer]) -> Vec<WalletBalance> {
        let mut ordered: Vec<&Transfer> = transfers.iter().collect();
        ordered.sort_by_key(|t| t.date);

        let mut wallets: BTreeMap<(String, String), WalletBalance> = BTreeMap::new();

        for transfer in ordered {
            let currency = transfer.currency.to_uppercase();

            let source = Self::wallet_entry(&mut wallets, &transfer.wallet_from, &currency, transfer);
            source.balance -= transfer.initial_amount;
            source.last_update = source.last_update.max(transfer.date);

            let destination = Self::wallet_entry(&mut wallets, &transfer.wallet_to, &currency, transfer);
            destination.balance += transfer.final_amount;
            destination.last_update = destination.last_update.max(transfer.date);
        }

        wallets.into_values().collect()
    }

    /// Total lost in transit per currency (`initial_amount - final_amount`). Sorted by currency.
    pub fn transfer_fees(&self, transfers: &[Transfer]) -> Vec<TransferFees> {
        let mut fees: BTreeMap<String, TransferFees> = BTreeMap::new();
        for transfer in transfers {
            let currency = transfer.currency.to_uppercase();
            let entry = fees.entry(currency.clone()).or_insert_with(|| TransferFees {
                currency,
                total_fees: 0.0,
                transfer_count: 0,
            });
            entry.total_fees += transfer.fee();
            entry.transfer_count += 1;
        }
        fees.into_values().collect()
    }

    fn wallet_entry<'a>(
        wallets: &'a mut BTreeMap<(String, String), WalletBalance>,
        name: &str,
        currency: &str,
        transfer: &Transfer,
    ) -> &'a mut WalletBalance {
        let name = name.trim();
        wallets
            .entry((name.to_ascii_lowercase(), currency.to_string()))
            .or_insert_with(|| WalletBalance {
                name: name.to_string(),
                balance: 0.0,
                currency: currency.to_string(),
                last_update: transfer.date,
            })
    }
}

impl Default for WalletService {
    fn default() -> Self {
        Self::new()
    }
}
