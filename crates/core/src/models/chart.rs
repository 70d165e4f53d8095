use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single data point for dashboard chart rendering.
///
/// The core generates these and the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// The day (daily series) or the first day of the month (monthly series)
    pub date: NaiveDate,

    /// Income recorded in this bucket
    pub income: f64,

    /// Expenses recorded in this bucket
    pub expenses: f64,

    /// `income - expenses`
    pub net: f64,

    /// Running sum of `net` from the start of the series
    pub cumulative: f64,
}
