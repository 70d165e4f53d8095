use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::metrics::{CategoryBreakdown, DashboardSummary, PeriodTotals};
use crate::models::period::Period;
use crate::models::transaction::{Transaction, TransactionAction};
use crate::services::chart_service::ChartService;

/// Percentage change from `previous` to `current`.
///
/// Returns 0 when `previous` is 0. The baseline's magnitude is used so that
/// a net that goes from -100 to -50 reads as +50%.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous.abs() * 100.0
}

/// Derives dashboard figures from transaction history.
///
/// Pure business logic: filters and sums, no I/O.
pub struct MetricsService {
    chart_service: ChartService,
}

impl MetricsService {
    pub fn new() -> Self {
        Self {
            chart_service: ChartService::new(),
        }
    }

    /// Income, expenses and net for transactions in `currency` within `period`.
    pub fn period_totals(
        &self,
        transactions: &[Transaction],
        period: &Period,
        currency: &str,
    ) -> PeriodTotals {
        let mut totals = PeriodTotals::default();
        for t in Self::matching(transactions, period, currency) {
            match t.action {
                TransactionAction::Income => totals.income += t.amount,
                TransactionAction::Expense => totals.expenses += t.amount,
            }
            totals.count += 1;
        }
        totals.net = totals.income - totals.expenses;
        totals
    }

    /// Per-category totals for one action, largest first (ties by name).
    pub fn category_breakdown(
        &self,
        transactions: &[Transaction],
        period: &Period,
        currency: &str,
        action: TransactionAction,
    ) -> Vec<CategoryBreakdown> {
        let mut by_category: HashMap<String, (f64, usize)> = HashMap::new();
        let mut grand_total = 0.0;

        for t in Self::matching(transactions, period, currency).filter(|t| t.action == action) {
            let entry = by_category.entry(t.category.trim().to_string()).or_insert((0.0, 0));
            entry.0 += t.amount;
            entry.1 += 1;
            grand_total += t.amount;
        }

        let mut breakdown: Vec<CategoryBreakdown> = by_category
            .into_iter()
            .map(|(category, (total, count))| CategoryBreakdown {
                category,
                total,
                share_pct: if grand_total > 0.0 {
                    total / grand_total * 100.0
                } else {
                    0.0
                },
                count,
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        breakdown
    }

    /// The dashboard for one month: totals, deltas versus the month before,
    /// category breakdowns and the daily series.
    pub fn dashboard(
        &self,
        transactions: &[Transaction],
        month: &Period,
        currency: &str,
    ) -> Result<DashboardSummary, CoreError> {
        if !matches!(month, Period::Month { .. }) {
            return Err(CoreError::Validation(format!(
                "Dashboard expects a calendar month, got '{month}'"
            )));
        }
        let currency = currency.trim().to_uppercase();
        let previous = month.previous().ok_or_else(|| {
            CoreError::Validation(format!("No month before '{month}'"))
        })?;

        let totals = self.period_totals(transactions, month, &currency);
        let previous_totals = self.period_totals(transactions, &previous, &currency);

        Ok(DashboardSummary {
            period: *month,
            income_change_pct: percentage_change(totals.income, previous_totals.income),
            expenses_change_pct: percentage_change(totals.expenses, previous_totals.expenses),
            net_change_pct: percentage_change(totals.net, previous_totals.net),
            expense_categories: self.category_breakdown(
                transactions,
                month,
                &currency,
                TransactionAction::Expense,
            ),
            income_categories: self.category_breakdown(
                transactions,
                month,
                &currency,
                TransactionAction::Income,
            ),
            daily: self.chart_service.daily_series(transactions, month, &currency)?,
            totals,
            previous_totals,
            currency,
        })
    }

    fn matching<'a>(
        transactions: &'a [Transaction],
        period: &'a Period,
        currency: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        transactions
            .iter()
            .filter(move |t| period.contains(t.date) && t.currency.eq_ignore_ascii_case(currency))
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
