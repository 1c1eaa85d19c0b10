//! HTTP route handlers for the per-diem API.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::AppState;

use super::requests::{CalculateItineraryRequest, SimulatePeriodsRequest, SimulateTripRequest};
use super::responses::CalculationResponse;
use super::services;

/// Per-diem API routes, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/diarias/calcular", post(calculate_itinerary))
        .route("/simulacao/diaria", post(simulate_trip))
        .route("/simulacao/periodos", post(simulate_periods))
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Chained itinerary: waypoints plus final return.
async fn calculate_itinerary(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CalculateItineraryRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>> {
    let (waypoints, final_return, travelers) = json_body(payload)?.into_itinerary()?;

    let calculation = services::calculate_itinerary(
        &waypoints,
        final_return,
        travelers,
        state.value_in_words(),
    )?;
    tracing::info!(
        periods = calculation.periods.len(),
        travelers,
        composition = %calculation.totals.composition,
        "Itinerary per-diem calculated"
    );

    Ok(Json(CalculationResponse::from(&calculation)))
}

/// Single what-if trip, optionally with a manual tariff override.
async fn simulate_trip(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SimulateTripRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>> {
    let (trip, travelers) = json_body(payload)?.into_trip()?;

    let calculation = services::simulate_trip(&trip, travelers, state.value_in_words())?;
    tracing::info!(
        travelers,
        composition = %calculation.totals.composition,
        "Trip simulation calculated"
    );

    Ok(Json(CalculationResponse::from(&calculation)))
}

/// Independent periods, each with an explicit tariff class.
async fn simulate_periods(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SimulatePeriodsRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>> {
    let (segments, travelers) = json_body(payload)?.into_segments()?;

    let calculation =
        services::calculate_standalone(&segments, travelers, state.value_in_words())?;
    tracing::info!(
        periods = calculation.periods.len(),
        travelers,
        composition = %calculation.totals.composition,
        "Period simulation calculated"
    );

    Ok(Json(CalculationResponse::from(&calculation)))
}
