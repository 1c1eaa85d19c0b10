//! Request DTOs for per-diem API endpoints.
//!
//! Dates arrive as `YYYY-MM-DD` and times as `HH:MM` (or `HH:MM:SS`), the
//! way the Django forms post them. Blank values count as missing.

use std::num::IntErrorKind;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer};

use crate::error::AppError;

use super::models::{SimulatedTrip, StandaloneSegment, Waypoint};
use super::services::{parse_override, DiariasError};

/// Request to calculate a chained itinerary
#[derive(Debug, Deserialize)]
pub struct CalculateItineraryRequest {
    #[serde(default)]
    pub waypoints: Vec<WaypointRequest>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub return_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_traveler_count")]
    pub traveler_count: Option<i64>,
}

/// One leg of the itinerary in the request
#[derive(Debug, Deserialize)]
pub struct WaypointRequest {
    #[serde(default)]
    pub destination_city: String,
    #[serde(default)]
    pub destination_region: String,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
}

/// Request to simulate a single trip
#[derive(Debug, Deserialize)]
pub struct SimulateTripRequest {
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub return_time: Option<String>,
    #[serde(default)]
    pub destination_city: String,
    #[serde(default)]
    pub destination_region: String,
    #[serde(default)]
    pub manual_override: Option<String>,
    #[serde(default, deserialize_with = "deserialize_traveler_count")]
    pub traveler_count: Option<i64>,
}

/// Request to value standalone periods
#[derive(Debug, Deserialize)]
pub struct SimulatePeriodsRequest {
    #[serde(default)]
    pub periods: Vec<PeriodRequest>,
    #[serde(default, deserialize_with = "deserialize_traveler_count")]
    pub traveler_count: Option<i64>,
}

/// A standalone period in the request
#[derive(Debug, Deserialize)]
pub struct PeriodRequest {
    #[serde(default, alias = "tipo")]
    pub tariff_class: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl CalculateItineraryRequest {
    /// Waypoints, final return and traveler count (negative counts become 0).
    pub fn into_itinerary(
        self,
    ) -> Result<(Vec<Waypoint>, Option<NaiveDateTime>, u32), AppError> {
        let waypoints = self
            .waypoints
            .into_iter()
            .map(|w| -> Result<Waypoint, AppError> {
                let departure =
                    parse_instant(w.departure_date.as_deref(), w.departure_time.as_deref())?
                        .ok_or(DiariasError::EmptyItinerary)?;
                Ok(Waypoint::new(departure, w.destination_city, w.destination_region))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let final_return = parse_instant(self.return_date.as_deref(), self.return_time.as_deref())?;
        let travelers = clamp_travelers(self.traveler_count.unwrap_or(1), 0)?;
        Ok((waypoints, final_return, travelers))
    }
}

impl SimulateTripRequest {
    /// Trip and traveler count (at least 1).
    pub fn into_trip(self) -> Result<(SimulatedTrip, u32), AppError> {
        let departure = parse_instant(self.departure_date.as_deref(), self.departure_time.as_deref())?;
        let arrival = parse_instant(self.return_date.as_deref(), self.return_time.as_deref())?;
        let (departure, arrival) = match (departure, arrival) {
            (Some(d), Some(a)) => (d, a),
            _ => return Err(DiariasError::EmptyItinerary.into()),
        };

        let trip = SimulatedTrip {
            departure,
            arrival,
            destination_city: self.destination_city,
            destination_region: self.destination_region,
            manual_override: parse_override(self.manual_override.as_deref())?,
        };
        Ok((trip, clamp_travelers(self.traveler_count.unwrap_or(1), 1)?))
    }
}

impl SimulatePeriodsRequest {
    /// Standalone segments and traveler count (at least 1).
    pub fn into_segments(self) -> Result<(Vec<StandaloneSegment>, u32), AppError> {
        let segments = self
            .periods
            .into_iter()
            .enumerate()
            .map(|(idx, p)| -> Result<StandaloneSegment, AppError> {
                let tariff = parse_override(p.tariff_class.as_deref())?;
                let start = parse_instant(p.start_date.as_deref(), p.start_time.as_deref())?;
                let end = parse_instant(p.end_date.as_deref(), p.end_time.as_deref())?;
                match (start, end) {
                    (Some(start), Some(end)) => Ok(StandaloneSegment { tariff, start, end }),
                    _ => Err(AppError::BadRequest(format!(
                        "period {}: start and end date/time are required",
                        idx + 1
                    ))),
                }
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok((segments, clamp_travelers(self.traveler_count.unwrap_or(1), 1)?))
    }
}

/// Negative counts clamp to `min`; counts beyond `u32` are rejected.
fn clamp_travelers(count: i64, min: u32) -> Result<u32, AppError> {
    u32::try_from(count.max(0))
        .map(|travelers| travelers.max(min))
        .map_err(|_| AppError::BadRequest(format!("traveler_count out of range: {}", count)))
}

/// Traveler count as a JSON integer or a numeric string.
///
/// Blank strings and `null` count as missing.
fn deserialize_traveler_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => {
            if let Some(count) = n.as_i64() {
                Ok(Some(count))
            } else if n.is_u64() {
                Err(de::Error::custom(format!("traveler_count out of range: {}", n)))
            } else {
                Err(de::Error::custom(format!("traveler_count must be a whole number: {}", n)))
            }
        }
        Some(serde_json::Value::String(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<i64>().map(Some).map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    de::Error::custom(format!("traveler_count out of range: {}", raw))
                }
                _ => de::Error::custom(format!("invalid traveler_count '{}'", raw)),
            })
        }
        Some(other) => Err(de::Error::custom(format!("invalid traveler_count {}", other))),
    }
}

/// Parse `YYYY-MM-DD`. Blank input is `None`.
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid date '{}'", raw))),
    }
}

/// Parse `HH:MM` or `HH:MM:SS`. Blank input is `None`.
pub fn parse_time(value: Option<&str>) -> Result<Option<NaiveTime>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid time '{}'", raw))),
    }
}

/// Combine a date and a time; `None` unless both are present.
pub fn parse_instant(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<Option<NaiveDateTime>, AppError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.zip(time).map(|(d, t)| d.and_time(t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diarias::models::ManualOverride;

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(
            parse_date(Some("2026-02-10")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
        assert_eq!(parse_date(Some("  ")).unwrap(), None);
        assert_eq!(parse_date(None).unwrap(), None);
        assert!(parse_date(Some("10/02/2026")).is_err());

        assert_eq!(parse_time(Some("08:00")).unwrap(), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(
            parse_time(Some("08:00:30")).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 30)
        );
        assert!(parse_time(Some("25:00")).is_err());
    }

    #[test]
    fn test_parse_instant_requires_both_parts() {
        assert!(parse_instant(Some("2026-02-10"), None).unwrap().is_none());
        assert!(parse_instant(None, Some("08:00")).unwrap().is_none());
        let instant = parse_instant(Some("2026-02-10"), Some("08:00")).unwrap().unwrap();
        assert_eq!(instant.to_string(), "2026-02-10 08:00:00");
    }

    #[test]
    fn test_itinerary_missing_departure_is_empty_itinerary() {
        let req: CalculateItineraryRequest = serde_json::from_value(serde_json::json!({
            "waypoints": [{
                "destination_city": "Paranaguá",
                "destination_region": "PR",
                "departure_date": "",
                "departure_time": ""
            }],
            "return_date": "2026-02-14",
            "return_time": "18:00"
        }))
        .unwrap();
        let err = req.into_itinerary().unwrap_err();
        assert!(matches!(err, AppError::Diarias(DiariasError::EmptyItinerary)));
    }

    #[test]
    fn test_itinerary_clamps_negative_travelers() {
        let req: CalculateItineraryRequest = serde_json::from_value(serde_json::json!({
            "waypoints": [],
            "traveler_count": -3
        }))
        .unwrap();
        let (waypoints, final_return, travelers) = req.into_itinerary().unwrap();
        assert!(waypoints.is_empty());
        assert!(final_return.is_none());
        assert_eq!(travelers, 0);
    }

    #[test]
    fn test_itinerary_rejects_traveler_count_beyond_u32() {
        let req: CalculateItineraryRequest = serde_json::from_value(serde_json::json!({
            "waypoints": [],
            "traveler_count": 9_999_999_999i64
        }))
        .unwrap();
        let err = req.into_itinerary().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("out of range")));
    }

    #[test]
    fn test_traveler_count_accepts_numeric_string() {
        let req: SimulatePeriodsRequest = serde_json::from_value(serde_json::json!({
            "periods": [],
            "traveler_count": " 2 "
        }))
        .unwrap();
        assert_eq!(req.traveler_count, Some(2));

        let req: SimulateTripRequest = serde_json::from_value(serde_json::json!({
            "traveler_count": ""
        }))
        .unwrap();
        assert_eq!(req.traveler_count, None);
    }

    #[test]
    fn test_traveler_count_rejects_garbage() {
        for bad in [
            serde_json::json!("dois"),
            serde_json::json!(1.5),
            serde_json::json!("99999999999999999999"),
            serde_json::json!(u64::MAX),
            serde_json::json!([2]),
        ] {
            let result = serde_json::from_value::<CalculateItineraryRequest>(
                serde_json::json!({ "traveler_count": bad.clone() }),
            );
            assert!(result.is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_simulation_defaults() {
        let req: SimulateTripRequest = serde_json::from_value(serde_json::json!({
            "departure_date": "2026-03-10",
            "departure_time": "08:00",
            "return_date": "2026-03-11",
            "return_time": "18:00",
            "traveler_count": 0
        }))
        .unwrap();
        let (trip, travelers) = req.into_trip().unwrap();
        assert_eq!(trip.manual_override, ManualOverride::Automatic);
        assert_eq!(travelers, 1);
    }

    #[test]
    fn test_simulation_rejects_unknown_override() {
        let req: SimulateTripRequest = serde_json::from_value(serde_json::json!({
            "departure_date": "2026-03-10",
            "departure_time": "08:00",
            "return_date": "2026-03-11",
            "return_time": "18:00",
            "manual_override": "EXTERIOR"
        }))
        .unwrap();
        assert!(matches!(
            req.into_trip().unwrap_err(),
            AppError::Diarias(DiariasError::MalformedManualOverride(_))
        ));
    }

    #[test]
    fn test_periods_accept_tipo_alias() {
        let req: SimulatePeriodsRequest = serde_json::from_value(serde_json::json!({
            "periods": [{
                "tipo": "INTERIOR",
                "start_date": "2026-03-10",
                "start_time": "08:00",
                "end_date": "2026-03-11",
                "end_time": "18:00"
            }],
            "traveler_count": 2
        }))
        .unwrap();
        let (segments, travelers) = req.into_segments().unwrap();
        assert_eq!(segments[0].tariff, ManualOverride::Interior);
        assert_eq!(travelers, 2);
    }

    #[test]
    fn test_periods_incomplete_dates() {
        let req: SimulatePeriodsRequest = serde_json::from_value(serde_json::json!({
            "periods": [{
                "tariff_class": "CAPITAL",
                "start_date": "2026-03-10",
                "start_time": "08:00"
            }]
        }))
        .unwrap();
        let err = req.into_segments().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.starts_with("period 1")));
    }
}
