//! Trip-level per-diem services.
//!
//! Turns itineraries (chained waypoints, explicit standalone periods or a
//! single simulated trip) into valued periods and trip totals. All segment
//! valuation goes through [`calculators::value_segment`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::calculators::{self, composition_summary, format_currency, round_money};
use super::destinations::{classify, synthetic_destination_for_override};
use super::models::{
    Calculation, ManualOverride, PeriodResult, Segment, SimulatedTrip, StandaloneSegment,
    TripTotals, Waypoint,
};

/// Suffix for the reference rate when periods use different rates.
pub const VARIABLE_RATE_SUFFIX: &str = " (variavel por periodo)";

/// Per-diem calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiariasError {
    #[error("itinerary is empty or has no final return date/time")]
    EmptyItinerary,

    #[error("invalid period: end {end} must be after start {start}")]
    InvalidPeriod {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("period {index}: an explicit tariff class is required")]
    MissingTariffClass { index: usize },

    #[error("unknown manual tariff override '{0}'")]
    MalformedManualOverride(String),
}

impl DiariasError {
    /// Stable identifier used in error responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            DiariasError::EmptyItinerary => "empty_itinerary",
            DiariasError::InvalidPeriod { .. } => "invalid_period",
            DiariasError::MissingTariffClass { .. } => "missing_tariff_class",
            DiariasError::MalformedManualOverride(_) => "malformed_manual_override",
        }
    }
}

/// Pair each waypoint with the next departure, or `final_return` for the
/// last one, and classify its destination.
///
/// Waypoints are stably sorted by departure, so equal departures keep their
/// input order.
pub fn chain_segments(waypoints: &[Waypoint], final_return: NaiveDateTime) -> Vec<Segment> {
    let mut sorted: Vec<&Waypoint> = waypoints.iter().collect();
    sorted.sort_by_key(|w| w.departure);

    sorted
        .iter()
        .enumerate()
        .map(|(idx, waypoint)| Segment {
            start: waypoint.departure,
            end: sorted
                .get(idx + 1)
                .map(|next| next.departure)
                .unwrap_or(final_return),
            tariff_class: classify(&waypoint.destination_city, &waypoint.destination_region),
        })
        .collect()
}

/// Value a chained itinerary.
pub fn build_periods(
    waypoints: &[Waypoint],
    final_return: Option<NaiveDateTime>,
    traveler_count: u32,
) -> Result<Vec<PeriodResult>, DiariasError> {
    let final_return = final_return.ok_or(DiariasError::EmptyItinerary)?;
    if waypoints.is_empty() {
        return Err(DiariasError::EmptyItinerary);
    }

    chain_segments(waypoints, final_return)
        .iter()
        .map(|s| calculators::value_segment(s.start, s.end, s.tariff_class, traveler_count))
        .collect()
}

/// Value explicit, independent periods.
///
/// Every period must name its tariff class; automatic classification is
/// rejected with [`DiariasError::MissingTariffClass`] (1-based index).
pub fn value_periods(
    segments: &[StandaloneSegment],
    traveler_count: u32,
) -> Result<Vec<PeriodResult>, DiariasError> {
    if segments.is_empty() {
        return Err(DiariasError::EmptyItinerary);
    }

    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            let class = segment
                .tariff
                .tariff_class()
                .ok_or(DiariasError::MissingTariffClass { index: idx + 1 })?;
            calculators::value_segment(segment.start, segment.end, class, traveler_count)
        })
        .collect()
}

/// Summarize valued periods into trip totals.
///
/// `value_in_words` spells out the formatted total; without it the field is
/// left empty.
pub fn aggregate(
    periods: &[PeriodResult],
    traveler_count: u32,
    value_in_words: Option<&dyn Fn(&str) -> String>,
) -> TripTotals {
    let total_value: Decimal = periods.iter().map(|p| p.subtotal).sum();
    let total_value = round_money(total_value, 2);
    let total_hours = round_money(periods.iter().map(|p| p.elapsed_hours).sum(), 2);

    let travelers = traveler_count.max(1);
    let value_per_traveler = round_money(total_value / Decimal::from(travelers), 2);

    let formatted_total = format_currency(total_value);
    let value_in_words = value_in_words
        .map(|spell| spell(&formatted_total))
        .unwrap_or_default();

    TripTotals {
        composition: composition_summary(periods),
        total_hours,
        total_value,
        value_in_words,
        traveler_count: travelers,
        value_per_traveler,
        reference_unit_rate: reference_unit_rate(periods),
    }
}

/// The common full-day rate, or the first one marked as variable.
fn reference_unit_rate(periods: &[PeriodResult]) -> String {
    let rates: Vec<String> = periods
        .iter()
        .map(|p| format_currency(p.daily_rate))
        .collect();

    match rates.first() {
        None => String::new(),
        Some(first) if rates.iter().all(|r| r == first) => first.clone(),
        Some(first) => format!("{}{}", first, VARIABLE_RATE_SUFFIX),
    }
}

/// Chained itinerary: periods plus totals.
pub fn calculate_itinerary(
    waypoints: &[Waypoint],
    final_return: Option<NaiveDateTime>,
    traveler_count: u32,
    value_in_words: Option<&dyn Fn(&str) -> String>,
) -> Result<Calculation, DiariasError> {
    let periods = build_periods(waypoints, final_return, traveler_count)?;
    let totals = aggregate(&periods, traveler_count, value_in_words);
    tracing::debug!(
        waypoints = waypoints.len(),
        periods = periods.len(),
        total = %totals.total_value,
        "Calculated chained itinerary"
    );
    Ok(Calculation { periods, totals })
}

/// Standalone periods: periods plus totals.
pub fn calculate_standalone(
    segments: &[StandaloneSegment],
    traveler_count: u32,
    value_in_words: Option<&dyn Fn(&str) -> String>,
) -> Result<Calculation, DiariasError> {
    let periods = value_periods(segments, traveler_count)?;
    let totals = aggregate(&periods, traveler_count, value_in_words);
    tracing::debug!(
        periods = periods.len(),
        total = %totals.total_value,
        "Calculated standalone periods"
    );
    Ok(Calculation { periods, totals })
}

/// Single what-if trip, optionally forcing the tariff class.
///
/// With an explicit override the destination is replaced by
/// [`synthetic_destination_for_override`] and the period reports the
/// override class.
pub fn simulate_trip(
    trip: &SimulatedTrip,
    traveler_count: u32,
    value_in_words: Option<&dyn Fn(&str) -> String>,
) -> Result<Calculation, DiariasError> {
    let (city, region) = synthetic_destination_for_override(
        &trip.destination_city,
        &trip.destination_region,
        trip.manual_override,
    );
    let waypoint = Waypoint::new(trip.departure, city, region);

    let mut calculation = calculate_itinerary(
        std::slice::from_ref(&waypoint),
        Some(trip.arrival),
        traveler_count,
        value_in_words,
    )?;

    if let Some(class) = trip.manual_override.tariff_class() {
        for period in &mut calculation.periods {
            period.tariff_class = class;
        }
    }
    Ok(calculation)
}

/// Parse an override token for callers holding raw strings.
pub fn parse_override(token: Option<&str>) -> Result<ManualOverride, DiariasError> {
    token.unwrap_or_default().parse()
}
