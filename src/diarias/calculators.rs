//! Core per-diem calculation functions.
//!
//! Pure functions for segment valuation - no I/O. Every calculation mode
//! values its segments through [`value_segment`].

use chrono::NaiveDateTime;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{PartialBucket, PeriodResult, TariffClass};
use super::rates::rate_for;
use super::services::DiariasError;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Remainders up to this many seconds earn no partial allowance.
const NO_PARTIAL_LIMIT: i64 = 6 * SECONDS_PER_HOUR;
/// Remainders up to this many seconds earn the 15% allowance.
const PARTIAL_15_LIMIT: i64 = 8 * SECONDS_PER_HOUR;

/// Round to specified decimal places using round-half-up.
///
/// Halfway values round away from zero, which for the non-negative amounts
/// handled here means up.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use diarias_web::diarias::round_money;
///
/// assert_eq!(round_money(dec!(2.005), 2), dec!(2.01));
/// assert_eq!(round_money(dec!(2.004), 2), dec!(2.00));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Format money as `1435,00`: two decimals, comma separator, no grouping.
pub fn format_currency(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount, 2)).replace('.', ",")
}

/// Seconds expressed in hours, rounded half-up to 2 decimals.
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    round_money(
        Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR),
        2,
    )
}

/// Whole days, partial bucket and leftover seconds for a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBreakdown {
    pub total_seconds: i64,
    pub full_days: i64,
    pub remainder_seconds: i64,
    pub partial: PartialBucket,
}

/// Split `start..end` into whole days and a partial-day bucket.
///
/// A span shorter than 24h that crosses midnight counts as one full day
/// with no partial allowance.
pub fn day_breakdown(start: NaiveDateTime, end: NaiveDateTime) -> Result<DayBreakdown, DiariasError> {
    if end <= start {
        return Err(DiariasError::InvalidPeriod { start, end });
    }

    let total_seconds = (end - start).num_seconds();
    let full_days = total_seconds / SECONDS_PER_DAY;
    let remainder_seconds = total_seconds - full_days * SECONDS_PER_DAY;

    if start.date() != end.date() && total_seconds < SECONDS_PER_DAY {
        return Ok(DayBreakdown {
            total_seconds,
            full_days: 1,
            remainder_seconds: 0,
            partial: PartialBucket::None,
        });
    }

    Ok(DayBreakdown {
        total_seconds,
        full_days,
        remainder_seconds,
        partial: partial_bucket(remainder_seconds),
    })
}

/// Partial-day bucket for the seconds left over after whole days.
pub fn partial_bucket(remainder_seconds: i64) -> PartialBucket {
    if remainder_seconds <= NO_PARTIAL_LIMIT {
        PartialBucket::None
    } else if remainder_seconds <= PARTIAL_15_LIMIT {
        PartialBucket::Fifteen
    } else {
        PartialBucket::Thirty
    }
}

/// Value one segment for `traveler_count` travelers.
///
/// Fails with [`DiariasError::InvalidPeriod`] unless `end` is strictly after
/// `start`. A traveler count of zero gives a zero subtotal.
pub fn value_segment(
    start: NaiveDateTime,
    end: NaiveDateTime,
    class: TariffClass,
    traveler_count: u32,
) -> Result<PeriodResult, DiariasError> {
    let breakdown = day_breakdown(start, end)?;
    let rate = rate_for(class);

    let value_per_traveler = round_money(
        rate.full_day * Decimal::from(breakdown.full_days) + rate.partial(breakdown.partial),
        2,
    );
    let subtotal = round_money(value_per_traveler * Decimal::from(traveler_count), 2);

    Ok(PeriodResult {
        tariff_class: class,
        start,
        end,
        full_days: breakdown.full_days,
        extra_hours: seconds_to_hours(breakdown.remainder_seconds),
        daily_rate: rate.full_day,
        value_per_traveler,
        subtotal,
        partial: breakdown.partial,
        elapsed_hours: seconds_to_hours(breakdown.total_seconds),
    })
}

/// Summary such as `4 x 100% + 1 x 30%`.
///
/// Whole days are summed across periods; partial buckets are counted per
/// period. Zero terms are omitted.
pub fn composition_summary(periods: &[PeriodResult]) -> String {
    let full: i64 = periods.iter().map(|p| p.full_days).sum();
    let p15 = periods
        .iter()
        .filter(|p| p.partial == PartialBucket::Fifteen)
        .count();
    let p30 = periods
        .iter()
        .filter(|p| p.partial == PartialBucket::Thirty)
        .count();

    let mut parts = Vec::new();
    if full > 0 {
        parts.push(format!("{} x 100%", full));
    }
    if p15 > 0 {
        parts.push(format!("{} x 15%", p15));
    }
    if p30 > 0 {
        parts.push(format!("{} x 30%", p30));
    }
    parts.join(" + ")
}
