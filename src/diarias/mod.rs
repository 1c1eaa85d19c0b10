//! Per-diem (diarias) engine module.
//!
//! Classifies destinations, values trip segments against the daily-allowance
//! schedule and summarizes trips. The engine itself is pure; `routes` exposes
//! it over HTTP/JSON for the Django front end.

pub mod calculators;
pub mod destinations;
pub mod models;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{format_currency, round_money, value_segment};
pub use destinations::{classify, synthetic_destination_for_override};
pub use models::{
    Calculation, ManualOverride, PartialBucket, PeriodResult, RateEntry, SimulatedTrip,
    StandaloneSegment, TariffClass, TripTotals, Waypoint,
};
pub use rates::rate_for;
pub use routes::router;
pub use services::{
    aggregate, build_periods, calculate_itinerary, calculate_standalone, simulate_trip,
    value_periods, DiariasError,
};
