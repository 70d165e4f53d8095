use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A reporting window for dashboards and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    /// A calendar month (`month` is 1-based)
    Month { year: i32, month: u32 },
    /// A calendar year
    Year { year: i32 },
    /// An inclusive date range
    Range { from: NaiveDate, to: NaiveDate },
    /// Everything ever recorded
    All,
}

impl Period {
    /// A calendar month, validated.
    pub fn month(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CoreError::Validation(format!(
                "Invalid month {year}-{month:02}"
            )));
        }
        Ok(Period::Month { year, month })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Period::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// An inclusive range; `from` must not be after `to`.
    pub fn range(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::Validation(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        Ok(Period::Range { from, to })
    }

    /// Parse a `YYYY-MM` month string.
    pub fn parse_month(s: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Validation(format!("Invalid month '{s}': expected YYYY-MM"));
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::month(year, month)
    }

    /// First and last day (inclusive), or `None` for `All`.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Period::Month { year, month } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                Some((first, next.pred_opt()?))
            }
            Period::Year { year } => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
            Period::Range { from, to } => Some((from, to)),
            Period::All => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((from, to)) => date >= from && date <= to,
            None => matches!(self, Period::All),
        }
    }

    /// The window of equal length immediately before this one.
    /// January's previous month is December of the prior year. `All` has none.
    pub fn previous(&self) -> Option<Period> {
        match *self {
            Period::Month { year, month } => Some(if month == 1 {
                Period::Month { year: year - 1, month: 12 }
            } else {
                Period::Month { year, month: month - 1 }
            }),
            Period::Year { year } => Some(Period::Year { year: year - 1 }),
            Period::Range { from, to } => {
                let len = (to - from).num_days();
                let prev_to = from.pred_opt()?;
                let prev_from = prev_to.checked_sub_signed(Duration::days(len))?;
                Some(Period::Range { from: prev_from, to: prev_to })
            }
            Period::All => None,
        }
    }

    /// Number of days in the window, or `None` for `All`.
    pub fn num_days(&self) -> Option<i64> {
        self.bounds().map(|(from, to)| (to - from).num_days() + 1)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Month { year, month } => write!(f, "{year}-{month:02}"),
            Period::Year { year } => write!(f, "{year}"),
            Period::Range { from, to } => write!(f, "{from}..{to}"),
            Period::All => write!(f, "all"),
        }
    }
}
