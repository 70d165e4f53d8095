use std::collections::{BTreeMap, HashMap};

use crate::models::investment::{InvestmentOperation, TradeAction};
use crate::models::position::{
    CategoryAllocation, ClosedPosition, PortfolioSummary, Position, PositionKey,
    PositionValuation, PriceMap,
};

/// Reconciles investment operations into positions and realized results.
///
/// Pure business logic, no I/O, no API calls. Prices for valuation are
/// handed in by the caller.
pub struct PositionService;

impl PositionService {
    pub fn new() -> Self {
        Self
    }

    /// Fold operations into one position per (symbol, platform, currency).
    ///
    /// Operations are walked in date order (stable, so same-day operations keep
    /// their input order). Buys add quantity and cost; sells only remove
    /// quantity, so the average price stays `total_invested / total_bought`.
    /// Output is sorted by key.
    pub fn aggregate_positions(&self, operations: &[InvestmentOperation]) -> Vec<Position> {
        let mut positions: BTreeMap<PositionKey, Position> = BTreeMap::new();

        for op in Self::chronological(operations) {
            let key = Self::key_of(op);
            let position = positions.entry(key.clone()).or_insert_with(|| Position {
                key,
                category: op.category.clone(),
                amount: 0.0,
                total_bought: 0.0,
                total_sold: 0.0,
                total_invested: 0.0,
                average_price: 0.0,
                first_date: op.date,
                last_date: op.date,
            });

            match op.action {
                TradeAction::Buy => {
                    position.amount += op.amount;
                    position.total_bought += op.amount;
                    position.total_invested += op.total();
                    position.average_price = if position.total_bought > 0.0 {
                        position.total_invested / position.total_bought
                    } else {
                        0.0
                    };
                }
                TradeAction::Sell => {
                    position.amount -= op.amount;
                    position.total_sold += op.amount;
                }
            }
            position.category = op.category.clone();
            position.last_date = op.date;
        }

        positions.into_values().collect()
    }

    /// Positions that still hold units.
    pub fn open_positions(&self, operations: &[InvestmentOperation]) -> Vec<Position> {
        self.aggregate_positions(operations)
            .into_iter()
            .filter(Position::is_open)
            .collect()
    }

    /// Pair every sell with the first buy of the same key dated on or before it.
    ///
    /// This is a first-match lookup, not lot tracking: several sells may pair
    /// with the same buy. A same-day buy counts regardless of input order. A
    /// sell with no buy on or before its date gets no buy price and zero
    /// profit. Output is in chronological order of the sells.
    pub fn closed_positions(&self, operations: &[InvestmentOperation]) -> Vec<ClosedPosition> {
        let ordered = Self::chronological(operations);

        let mut first_buys: HashMap<PositionKey, &InvestmentOperation> = HashMap::new();
        for op in ordered.iter().copied().filter(|op| op.action == TradeAction::Buy) {
            first_buys.entry(Self::key_of(op)).or_insert(op);
        }

        let mut closed = Vec::new();
        for op in ordered.into_iter().filter(|op| op.action == TradeAction::Sell) {
            let key = Self::key_of(op);
            let buy = first_buys
                .get(&key)
                .copied()
                .filter(|buy| buy.date <= op.date);
            let (realized_profit, return_pct) = match buy {
                Some(buy) => (
                    (op.price - buy.price) * op.amount,
                    if buy.price > 0.0 {
                        (op.price - buy.price) / buy.price * 100.0
                    } else {
                        0.0
                    },
                ),
                None => (0.0, 0.0),
            };
            closed.push(ClosedPosition {
                key,
                category: op.category.clone(),
                sell_date: op.date,
                amount: op.amount,
                sell_price: op.price,
                buy_price: buy.map(|b| b.price),
                buy_date: buy.map(|b| b.date),
                realized_profit,
                return_pct,
            });
        }

        closed
    }

    /// Mark positions to market.
    ///
    /// A position whose `(symbol, currency)` has no price in `prices` is
    /// valued at cost, with zero unrealized profit.
    pub fn valuate(&self, positions: &[Position], prices: &PriceMap) -> Vec<PositionValuation> {
        positions
            .iter()
            .map(|position| {
                let lookup = (position.key.symbol.clone(), position.key.currency.clone());
                let current_price = prices.get(&lookup).copied();
                let cost_basis = position.cost_basis();
                let market_value = match current_price {
                    Some(price) => position.amount * price,
                    None => cost_basis,
                };
                let unrealized_profit = market_value - cost_basis;
                PositionValuation {
                    position: position.clone(),
                    current_price,
                    market_value,
                    unrealized_profit,
                    unrealized_pct: if cost_basis > 0.0 {
                        unrealized_profit / cost_basis * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }

    /// Per-currency portfolio figures with a category allocation breakdown.
    /// Sorted by currency.
    pub fn portfolio_summary(
        &self,
        operations: &[InvestmentOperation],
        prices: &PriceMap,
    ) -> Vec<PortfolioSummary> {
        let positions = self.aggregate_positions(operations);
        let closed = self.closed_positions(operations);
        let open: Vec<Position> = positions.iter().filter(|p| p.is_open()).cloned().collect();
        let valuations = self.valuate(&open, prices);

        let mut summaries: BTreeMap<String, PortfolioSummary> = BTreeMap::new();
        let mut by_category: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

        for position in &positions {
            Self::summary_entry(&mut summaries, &position.key.currency).total_invested +=
                position.total_invested;
        }

        for v in &valuations {
            let s = Self::summary_entry(&mut summaries, &v.position.key.currency);
            s.cost_basis += v.position.cost_basis();
            s.market_value += v.market_value;
            s.unrealized_profit += v.unrealized_profit;
            s.open_positions += 1;
            *by_category
                .entry(v.position.key.currency.clone())
                .or_default()
                .entry(v.position.category.clone())
                .or_insert(0.0) += v.market_value;
        }

        for c in &closed {
            Self::summary_entry(&mut summaries, &c.key.currency).realized_profit +=
                c.realized_profit;
        }

        for (currency, summary) in summaries.iter_mut() {
            summary.unrealized_pct = if summary.cost_basis > 0.0 {
                summary.unrealized_profit / summary.cost_basis * 100.0
            } else {
                0.0
            };

            let total = summary.market_value;
            let mut allocation: Vec<CategoryAllocation> = by_category
                .remove(currency)
                .unwrap_or_default()
                .into_iter()
                .map(|(category, market_value)| CategoryAllocation {
                    category,
                    market_value,
                    allocation_pct: if total > 0.0 {
                        market_value / total * 100.0
                    } else {
                        0.0
                    },
                })
                .collect();
            allocation.sort_by(|a, b| {
                b.market_value
                    .partial_cmp(&a.market_value)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            summary.allocation = allocation;
        }

        summaries.into_values().collect()
    }

    fn summary_entry<'a>(
        summaries: &'a mut BTreeMap<String, PortfolioSummary>,
        currency: &str,
    ) -> &'a mut PortfolioSummary {
        summaries
            .entry(currency.to_string())
            .or_insert_with(|| PortfolioSummary {
                currency: currency.to_string(),
                total_invested: 0.0,
                cost_basis: 0.0,
                market_value: 0.0,
                unrealized_profit: 0.0,
                unrealized_pct: 0.0,
                realized_profit: 0.0,
                open_positions: 0,
                allocation: Vec::new(),
            })
    }

    fn key_of(op: &InvestmentOperation) -> PositionKey {
        PositionKey::new(&op.symbol, &op.platform, &op.currency)
    }

    fn chronological(operations: &[InvestmentOperation]) -> Vec<&InvestmentOperation> {
        let mut ordered: Vec<&InvestmentOperation> = operations.iter().collect();
        ordered.sort_by_key(|op| op.date);
        ordered
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}
