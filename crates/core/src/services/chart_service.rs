use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::chart::ChartDataPoint;
use crate::models::period::Period;
use crate::models::transaction::{Transaction, TransactionAction};

/// Maximum chart date range in days (10 years).
pub const MAX_CHART_RANGE_DAYS: i64 = 3650;

/// Generates chart-ready series from transaction history.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// One point per day of `period`, zero-filled, for transactions in `currency`.
    ///
    /// `Period::All` spans the first to the last transaction in that currency
    /// (empty when there are none).
    pub fn daily_series(
        &self,
        transactions: &[Transaction],
        period: &Period,
        currency: &str,
    ) -> Result<Vec<ChartDataPoint>, CoreError> {
        let in_currency: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.currency.eq_ignore_ascii_case(currency))
            .collect();

        let (from, to) = match period.bounds() {
            Some(bounds) => bounds,
            None => {
                let first = in_currency.iter().map(|t| t.date).min();
                let last = in_currency.iter().map(|t| t.date).max();
                match (first, last) {
                    (Some(first), Some(last)) => (first, last),
                    _ => return Ok(Vec::new()),
                }
            }
        };

        let range_days = (to - from).num_days();
        if range_days > MAX_CHART_RANGE_DAYS {
            return Err(CoreError::Validation(format!(
                "Chart range of {range_days} days exceeds maximum of {MAX_CHART_RANGE_DAYS} days (10 years)"
            )));
        }

        // Index amounts by date for O(1) lookup per day
        let mut by_date: HashMap<NaiveDate, (f64, f64)> = HashMap::new();
        for t in in_currency.iter().filter(|t| t.date >= from && t.date <= to) {
            let bucket = by_date.entry(t.date).or_insert((0.0, 0.0));
            match t.action {
                TransactionAction::Income => bucket.0 += t.amount,
                TransactionAction::Expense => bucket.1 += t.amount,
            }
        }

        let mut cumulative = 0.0;
        let points = from
            .iter_days()
            .take_while(|d| *d <= to)
            .map(|date| {
                let (income, expenses) = by_date.get(&date).copied().unwrap_or((0.0, 0.0));
                let net = income - expenses;
                cumulative += net;
                ChartDataPoint {
                    date,
                    income,
                    expenses,
                    net,
                    cumulative,
                }
            })
            .collect();

        Ok(points)
    }

    /// Twelve points for `year`, each dated on the first of its month.
    pub fn monthly_series(
        &self,
        transactions: &[Transaction],
        year: i32,
        currency: &str,
    ) -> Vec<ChartDataPoint> {
        let mut months = [(0.0_f64, 0.0_f64); 12];
        for t in transactions
            .iter()
            .filter(|t| t.date.year() == year && t.currency.eq_ignore_ascii_case(currency))
        {
            let bucket = &mut months[t.date.month0() as usize];
            match t.action {
                TransactionAction::Income => bucket.0 += t.amount,
                TransactionAction::Expense => bucket.1 += t.amount,
            }
        }

        let mut cumulative = 0.0;
        months
            .iter()
            .enumerate()
            .filter_map(|(i, (income, expenses))| {
                let date = NaiveDate::from_ymd_opt(year, i as u32 + 1, 1)?;
                let net = income - expenses;
                cumulative += net;
                Some(ChartDataPoint {
                    date,
                    income: *income,
                    expenses: *expenses,
                    net,
                    cumulative,
                })
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
