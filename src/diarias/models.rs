//! Domain models for per-diem calculations.
//!
//! Everything here is an immutable value built fresh for each calculation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use super::services::DiariasError;

/// Destination-dependent daily rate tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TariffClass {
    Interior,
    Capital,
    Brasilia,
}

impl TariffClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffClass::Interior => "INTERIOR",
            TariffClass::Capital => "CAPITAL",
            TariffClass::Brasilia => "BRASILIA",
        }
    }
}

impl fmt::Display for TariffClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full-day and partial-day rates for one tariff class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    pub full_day: Decimal,
    pub partial_15: Decimal,
    pub partial_30: Decimal,
}

impl RateEntry {
    /// Rate paid for the trailing partial day in the given bucket.
    pub fn partial(&self, bucket: PartialBucket) -> Decimal {
        match bucket {
            PartialBucket::None => Decimal::ZERO,
            PartialBucket::Fifteen => self.partial_15,
            PartialBucket::Thirty => self.partial_30,
        }
    }
}

/// Additional allowance fraction for a partial day beyond whole 24h units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartialBucket {
    None,
    Fifteen,
    Thirty,
}

impl PartialBucket {
    pub fn percent(&self) -> u8 {
        match self {
            PartialBucket::None => 0,
            PartialBucket::Fifteen => 15,
            PartialBucket::Thirty => 30,
        }
    }
}

/// One itinerary leg: when it departs and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    pub departure: NaiveDateTime,
    pub destination_city: String,
    pub destination_region: String,
}

impl Waypoint {
    pub fn new(
        departure: NaiveDateTime,
        destination_city: impl Into<String>,
        destination_region: impl Into<String>,
    ) -> Self {
        Self {
            departure,
            destination_city: destination_city.into(),
            destination_region: destination_region.into(),
        }
    }
}

/// A classified time span to be valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub tariff_class: TariffClass,
}

/// Manual tariff selection accepted by the simulation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManualOverride {
    #[default]
    Automatic,
    Interior,
    Capital,
    Brasilia,
}

impl ManualOverride {
    /// Explicit tariff class, or `None` for automatic classification.
    pub fn tariff_class(&self) -> Option<TariffClass> {
        match self {
            ManualOverride::Automatic => None,
            ManualOverride::Interior => Some(TariffClass::Interior),
            ManualOverride::Capital => Some(TariffClass::Capital),
            ManualOverride::Brasilia => Some(TariffClass::Brasilia),
        }
    }
}

impl FromStr for ManualOverride {
    type Err = DiariasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "AUTOMATIC" | "AUTOMATICO" => Ok(ManualOverride::Automatic),
            "INTERIOR" => Ok(ManualOverride::Interior),
            "CAPITAL" => Ok(ManualOverride::Capital),
            "BRASILIA" => Ok(ManualOverride::Brasilia),
            _ => Err(DiariasError::MalformedManualOverride(s.trim().to_string())),
        }
    }
}

/// Explicit period for standalone mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandaloneSegment {
    pub tariff: ManualOverride,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Single trip for the simulation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedTrip {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub destination_city: String,
    pub destination_region: String,
    pub manual_override: ManualOverride,
}

/// Valued segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodResult {
    pub tariff_class: TariffClass,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Whole days billed at 100%
    pub full_days: i64,
    /// Hours beyond the whole days, 2 dp (zero under the midnight rule)
    pub extra_hours: Decimal,
    /// Full-day rate of the segment's tariff class
    pub daily_rate: Decimal,
    pub value_per_traveler: Decimal,
    pub subtotal: Decimal,
    pub partial: PartialBucket,
    /// Elapsed hours, 2 dp. Display only.
    pub elapsed_hours: Decimal,
}

impl PeriodResult {
    pub fn departure_date(&self) -> String {
        self.start.format("%d/%m/%Y").to_string()
    }

    pub fn departure_time(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn arrival_date(&self) -> String {
        self.end.format("%d/%m/%Y").to_string()
    }

    pub fn arrival_time(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

/// Trip-level summary derived from a list of periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTotals {
    /// e.g. "4 x 100% + 1 x 30%"
    pub composition: String,
    pub total_hours: Decimal,
    pub total_value: Decimal,
    pub value_in_words: String,
    pub traveler_count: u32,
    pub value_per_traveler: Decimal,
    pub reference_unit_rate: String,
}

/// Periods plus their totals, as returned by every calculation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub periods: Vec<PeriodResult>,
    pub totals: TripTotals,
}
