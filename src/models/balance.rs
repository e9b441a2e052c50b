//! Time-bucketed balance records
//!
//! A `BalancePoint` is one bucket of a balance query: a day, a month or a
//! whole year, identified by its fuzzy date (`YYYYMMDD` with zeroed month
//! and/or day for the coarser granularities).

use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{BalancesError, BalancesResult};

/// One bucket of period and cumulative balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    /// Day of month, 0 for monthly and yearly buckets
    #[serde(default)]
    pub day: u32,

    /// Month of year, 0 for yearly buckets
    #[serde(default)]
    pub month: u32,

    pub year: i32,

    /// Encoded `YYYYMMDD` bucket key
    pub fuzzy_date: u32,

    #[serde(default)]
    pub period_balance: Money,

    #[serde(default)]
    pub cumulative_balance: Money,

    #[serde(default)]
    pub period_credit: Money,

    #[serde(default)]
    pub period_debit: Money,

    #[serde(default)]
    pub cumulative_credit: Money,

    #[serde(default)]
    pub cumulative_debit: Money,
}

impl BalancePoint {
    /// Create an empty bucket for the given calendar position
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        let fuzzy_date = (year.max(0) as u32)
            .saturating_mul(10_000)
            .saturating_add(month.saturating_mul(100))
            .saturating_add(day);
        Self {
            day,
            month,
            year,
            fuzzy_date,
            period_balance: Money::zero(),
            cumulative_balance: Money::zero(),
            period_credit: Money::zero(),
            period_debit: Money::zero(),
            cumulative_credit: Money::zero(),
            cumulative_debit: Money::zero(),
        }
    }

    /// Calendar date of this bucket
    ///
    /// Zero month bumps the year and zero day bumps the month before the date
    /// is built; the result then rolls over like a lenient calendar, so a
    /// yearly bucket lands on Dec 31 and a monthly one on the month's last day.
    pub fn date(&self) -> BalancesResult<NaiveDate> {
        let mut year = self.year;
        let mut month = self.month;
        if month == 0 {
            year += 1;
        }
        if self.day == 0 {
            month += 1;
        }
        lenient_date(year, month, self.day).ok_or_else(|| {
            BalancesError::Parse(format!("Invalid balance date: {}", self.fuzzy_date))
        })
    }

    /// The bucket date at midnight in the book's fixed UTC offset (in minutes)
    pub fn date_time(&self, offset_minutes: i32) -> BalancesResult<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| {
            BalancesError::Config(format!("Invalid time zone offset: {}", offset_minutes))
        })?;
        let midnight = self
            .date()?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| BalancesError::Parse("Invalid midnight".into()))?;
        offset
            .from_local_datetime(&midnight)
            .single()
            .ok_or_else(|| BalancesError::Parse(format!("Ambiguous date: {}", midnight)))
    }

    /// Add every decimal field of `other` into this bucket
    pub fn merge(&mut self, other: &BalancePoint) -> BalancesResult<()> {
        self.period_balance = self.period_balance.plus(other.period_balance)?;
        self.cumulative_balance = self.cumulative_balance.plus(other.cumulative_balance)?;
        self.period_credit = self.period_credit.plus(other.period_credit)?;
        self.period_debit = self.period_debit.plus(other.period_debit)?;
        self.cumulative_credit = self.cumulative_credit.plus(other.cumulative_credit)?;
        self.cumulative_debit = self.cumulative_debit.plus(other.cumulative_debit)?;
        Ok(())
    }

    /// Subtract every decimal field of `other` from this bucket
    pub fn unmerge(&mut self, other: &BalancePoint) -> BalancesResult<()> {
        self.period_balance = self.period_balance.minus(other.period_balance)?;
        self.cumulative_balance = self.cumulative_balance.minus(other.cumulative_balance)?;
        self.period_credit = self.period_credit.minus(other.period_credit)?;
        self.period_debit = self.period_debit.minus(other.period_debit)?;
        self.cumulative_credit = self.cumulative_credit.minus(other.cumulative_credit)?;
        self.cumulative_debit = self.cumulative_debit.minus(other.cumulative_debit)?;
        Ok(())
    }

    /// A copy with every decimal field negated
    pub fn negated(&self) -> Self {
        Self {
            period_balance: -self.period_balance,
            cumulative_balance: -self.cumulative_balance,
            period_credit: -self.period_credit,
            period_debit: -self.period_debit,
            cumulative_credit: -self.cumulative_credit,
            cumulative_debit: -self.cumulative_debit,
            ..self.clone()
        }
    }
}

/// Build a date where month 13 is January of the next year, month 0 is
/// December of the previous one and day 0 is the last day of the previous month
fn lenient_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let zero_based = i64::from(month) - 1;
    let year = i32::try_from(i64::from(year) + zero_based.div_euclid(12)).ok()?;
    let month = u32::try_from(zero_based.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    if day == 0 {
        return first.pred_opt();
    }
    // Past the end of the month, spill into the next one
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| first.checked_add_days(Days::new(u64::from(day - 1))))
}
