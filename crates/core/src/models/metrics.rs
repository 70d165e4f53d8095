use serde::{Deserialize, Serialize};

use super::chart::ChartDataPoint;
use super::period::Period;

/// Income/expense totals for one period and currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: f64,
    pub expenses: f64,

    /// `income - expenses`
    pub net: f64,

    /// Number of transactions counted
    pub count: usize,
}

/// One category's slice of an income or expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: f64,

    /// Share of the action total, in percent (0 when the total is 0)
    pub share_pct: f64,

    pub count: usize,
}

/// Everything the dashboard page shows for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub period: Period,
    pub currency: String,

    pub totals: PeriodTotals,

    /// Totals for the month before, used for the deltas
    pub previous_totals: PeriodTotals,

    pub income_change_pct: f64,
    pub expenses_change_pct: f64,
    pub net_change_pct: f64,

    /// Largest first
    pub expense_categories: Vec<CategoryBreakdown>,

    /// Largest first
    pub income_categories: Vec<CategoryBreakdown>,

    /// One point per day of the month, zero-filled
    pub daily: Vec<ChartDataPoint>,
}
