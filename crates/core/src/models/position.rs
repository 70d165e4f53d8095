use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current market prices keyed by `(SYMBOL, CURRENCY)`, both uppercased.
pub type PriceMap = HashMap<(String, String), f64>;

/// Grouping key for investment operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionKey {
    pub symbol: String,
    pub platform: String,
    pub currency: String,
}

impl PositionKey {
    pub fn new(
        symbol: impl Into<String>,
        platform: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            platform: platform.into(),
            currency: currency.into().to_uppercase(),
        }
    }
}

impl std::fmt::Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.symbol, self.platform, self.currency)
    }
}

/// Net holding for one (symbol, platform, currency) key.
///
/// `total_invested` only ever grows: sells reduce `amount` but leave the
/// recorded cost alone, so `average_price` keeps the buy-side basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(flatten)]
    pub key: PositionKey,

    /// Category of the most recent operation for this key
    pub category: String,

    /// Remaining quantity: bought minus sold
    pub amount: f64,

    /// Quantity bought over the whole history
    pub total_bought: f64,

    /// Quantity sold over the whole history
    pub total_sold: f64,

    /// Sum of `amount * price` over buy legs
    pub total_invested: f64,

    /// `total_invested / total_bought`, 0 when nothing was bought
    pub average_price: f64,

    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl Position {
    /// Cost of the units still held, at the average price.
    pub fn cost_basis(&self) -> f64 {
        self.amount * self.average_price
    }

    pub fn is_open(&self) -> bool {
        self.amount > f64::EPSILON
    }
}

/// A sell matched against an earlier buy of the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPosition {
    #[serde(flatten)]
    pub key: PositionKey,

    pub category: String,
    pub sell_date: NaiveDate,

    /// Units sold
    pub amount: f64,

    pub sell_price: f64,

    /// Price of the matched buy, `None` when no earlier buy exists
    pub buy_price: Option<f64>,
    pub buy_date: Option<NaiveDate>,

    /// `(sell_price - buy_price) * amount`
    pub realized_profit: f64,

    /// `(sell_price - buy_price) / buy_price * 100`
    pub return_pct: f64,
}

/// An open position marked to market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionValuation {
    pub position: Position,

    /// `None` when no live price was available; the position is then valued at cost
    pub current_price: Option<f64>,

    pub market_value: f64,

    /// `market_value - cost_basis`
    pub unrealized_profit: f64,

    pub unrealized_pct: f64,
}

/// One category's share of a currency's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: String,
    pub market_value: f64,

    /// Percent of the currency's total market value
    pub allocation_pct: f64,
}

/// Portfolio figures for all positions denominated in one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub currency: String,

    /// Sum of buy legs over the whole history
    pub total_invested: f64,

    /// Cost of the units still held
    pub cost_basis: f64,

    pub market_value: f64,
    pub unrealized_profit: f64,
    pub unrealized_pct: f64,

    /// Sum of realized profit over closed positions
    pub realized_profit: f64,

    pub open_positions: usize,

    /// Largest first
    pub allocation: Vec<CategoryAllocation>,
}
