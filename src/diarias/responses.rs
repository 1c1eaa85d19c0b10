//! Response DTOs for per-diem API endpoints.
//!
//! Keys follow the contract the Django templates already consume
//! (`periodos`/`totais`). Money is sent as `1435,00` strings.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::format_currency;
use super::models::{Calculation, PeriodResult, TripTotals};

/// Valued period for JSON responses
#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    pub tipo: String,
    pub data_saida: String,
    pub hora_saida: String,
    pub data_chegada: String,
    pub hora_chegada: String,
    pub n_diarias: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub horas_adicionais: Decimal,
    pub valor_diaria: String,
    pub valor_servidor: String,
    pub subtotal: String,
    pub percentual_adicional: u8,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_horas_periodo: Decimal,
}

/// Trip totals for JSON responses
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub total_diarias: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_horas: Decimal,
    pub total_valor: String,
    pub valor_extenso: String,
    pub quantidade_servidores: u32,
    pub diarias_por_servidor: String,
    pub valor_por_servidor: String,
    pub valor_unitario_referencia: String,
}

/// Response for every calculation endpoint
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub periodos: Vec<PeriodResponse>,
    pub totais: TotalsResponse,
}

/// Per-diem error response
#[derive(Debug, Serialize)]
pub struct DiariasErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl From<&PeriodResult> for PeriodResponse {
    fn from(period: &PeriodResult) -> Self {
        Self {
            tipo: period.tariff_class.to_string(),
            data_saida: period.departure_date(),
            hora_saida: period.departure_time(),
            data_chegada: period.arrival_date(),
            hora_chegada: period.arrival_time(),
            n_diarias: period.full_days,
            horas_adicionais: period.extra_hours,
            valor_diaria: format_currency(period.daily_rate),
            valor_servidor: format_currency(period.value_per_traveler),
            subtotal: format_currency(period.subtotal),
            percentual_adicional: period.partial.percent(),
            total_horas_periodo: period.elapsed_hours,
        }
    }
}

impl From<&TripTotals> for TotalsResponse {
    fn from(totals: &TripTotals) -> Self {
        Self {
            total_diarias: totals.composition.clone(),
            total_horas: totals.total_hours,
            total_valor: format_currency(totals.total_value),
            valor_extenso: totals.value_in_words.clone(),
            quantidade_servidores: totals.traveler_count,
            diarias_por_servidor: totals.composition.clone(),
            valor_por_servidor: format_currency(totals.value_per_traveler),
            valor_unitario_referencia: totals.reference_unit_rate.clone(),
        }
    }
}

impl From<&Calculation> for CalculationResponse {
    fn from(calculation: &Calculation) -> Self {
        Self {
            periodos: calculation.periods.iter().map(PeriodResponse::from).collect(),
            totais: TotalsResponse::from(&calculation.totals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diarias::services::calculate_itinerary;
    use crate::diarias::models::Waypoint;
    use chrono::NaiveDate;

    #[test]
    fn test_calculation_response_shape() {
        let at = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2026, 2, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let waypoints = vec![
            Waypoint::new(at(10, 8), "Paranaguá", "PR"),
            Waypoint::new(at(12, 8), "São Paulo", "SP"),
        ];
        let calc = calculate_itinerary(&waypoints, Some(at(14, 18)), 1, None).unwrap();
        let json = serde_json::to_value(CalculationResponse::from(&calc)).unwrap();

        let first = &json["periodos"][0];
        assert_eq!(first["tipo"], "INTERIOR");
        assert_eq!(first["data_saida"], "10/02/2026");
        assert_eq!(first["hora_saida"], "08:00");
        assert_eq!(first["valor_diaria"], "290,55");
        assert_eq!(first["subtotal"], "581,10");
        assert_eq!(first["percentual_adicional"], 0);

        let second = &json["periodos"][1];
        assert_eq!(second["tipo"], "CAPITAL");
        assert_eq!(second["horas_adicionais"], 10.0);
        assert_eq!(second["percentual_adicional"], 30);

        let totals = &json["totais"];
        assert_eq!(totals["total_diarias"], "4 x 100% + 1 x 30%");
        assert_eq!(totals["diarias_por_servidor"], "4 x 100% + 1 x 30%");
        assert_eq!(totals["total_valor"], "1435,00");
        assert_eq!(totals["valor_por_servidor"], "1435,00");
        assert_eq!(totals["total_horas"], 106.0);
        assert_eq!(totals["quantidade_servidores"], 1);
    }
}
