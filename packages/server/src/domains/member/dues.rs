//! Dues accrual: total contribution owed as a pure function of time
//!
//! The total is always recomputed from scratch for a reference month,
//! never applied as a delta to a stored balance. Accrual starts at the
//! later of the member's organization join date and the configured epoch,
//! charges one month at a time, and prices each month by the member's age
//! that month.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::{Config, RateTable};
use crate::domains::member::models::member::Member;

/// First day of the month `date` falls in.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Calendar-month shift with day-of-month clamping (Jan 31 + 1 → Feb 28).
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Age in whole years on a given date, birthday-not-yet-reached rule.
pub fn age_on(born: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - born.year();
    if (on.month(), on.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

/// Number of monthly charges between `start` and the reference month.
///
/// Rolling year/month/day delta, not calendar truncation: take the raw
/// calendar month difference, step back if anchoring `start` that many
/// months (day clamped) overshoots the reference, then count one more
/// charge for the non-negative remaining day component. A reference
/// before `start` yields zero, never a negative count.
pub fn months_to_charge(start: NaiveDate, reference_month_start: NaiveDate) -> u32 {
    if reference_month_start < start {
        return 0;
    }

    let mut months = (reference_month_start.year() - start.year()) * 12
        + reference_month_start.month() as i32
        - start.month() as i32;
    if add_months(start, months as u32) > reference_month_start {
        months -= 1;
    }
    if months < 0 {
        return 0;
    }
    months as u32 + 1
}

/// Total contribution owed as of `reference_month_start`.
///
/// Pure and idempotent: identical inputs always produce the identical
/// total. Every month past the epoch is charged; there are no exemptions.
pub fn total_contribution(
    join_date_to_organization: NaiveDate,
    date_of_birth: NaiveDate,
    reference_month_start: NaiveDate,
    epoch: NaiveDate,
    rates: &RateTable,
) -> i64 {
    let start = join_date_to_organization.max(epoch);
    let months = months_to_charge(start, reference_month_start);

    (0..months)
        .map(|i| rates.rate_for_age(age_on(date_of_birth, add_months(start, i))))
        .sum()
}

/// Total contribution for a member under the configured epoch and rates.
pub fn accrue(member: &Member, reference_month_start: NaiveDate, config: &Config) -> i64 {
    total_contribution(
        member.join_date_to_organization,
        member.date_of_birth,
        reference_month_start,
        config.contribution_epoch,
        &config.rates,
    )
}
