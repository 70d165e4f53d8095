use std::collections::BTreeMap;

use crate::models::forex::{ForexOperation, ForexSummary};
use crate::models::investment::TradeAction;

/// Summarizes currency exchange operations per pair and side.
pub struct ForexService;

impl ForexService {
    pub fn new() -> Self {
        Self
    }

    /// One summary per (currency_from, currency_to, action), sorted by pair then buys first.
    pub fn forex_summary(&self, operations: &[ForexOperation]) -> Vec<ForexSummary> {
        let mut groups: BTreeMap<(String, String, u8), ForexSummary> = BTreeMap::new();

        for op in operations {
            let from = op.currency_from.to_uppercase();
            let to = op.currency_to.to_uppercase();
            let side = match op.action {
                TradeAction::Buy => 0,
                TradeAction::Sell => 1,
            };
            let summary = groups
                .entry((from.clone(), to.clone(), side))
                .or_insert_with(|| ForexSummary {
                    currency_from: from,
                    currency_to: to,
                    action: op.action,
                    total_amount: 0.0,
                    total_paid: 0.0,
                    average_rate: 0.0,
                    operations: 0,
                });
            summary.total_amount += op.amount;
            summary.total_paid += op.total;
            summary.operations += 1;
        }

        groups
            .into_values()
            .map(|mut s| {
                s.average_rate = if s.total_amount > 0.0 {
                    s.total_paid / s.total_amount
                } else {
                    0.0
                };
                s
            })
            .collect()
    }
}

impl Default for ForexService {
    fn default() -> Self {
        Self::new()
    }
}
