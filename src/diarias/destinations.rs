//! Destination classification.
//!
//! Maps a city/region pair onto a tariff class using the fixed table of
//! state capitals. Names are compared after trimming, upper-casing and
//! stripping diacritics, so "São Paulo" and "SAO PAULO" are the same city.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::models::{ManualOverride, TariffClass};

/// Region used when an override needs one and the input has none.
pub const DEFAULT_REGION: &str = "PR";

/// Capital city for each of the 27 federative units (normalized names).
const CAPITALS_BY_REGION: [(&str, &str); 27] = [
    ("AC", "RIO BRANCO"),
    ("AL", "MACEIO"),
    ("AP", "MACAPA"),
    ("AM", "MANAUS"),
    ("BA", "SALVADOR"),
    ("CE", "FORTALEZA"),
    ("DF", "BRASILIA"),
    ("ES", "VITORIA"),
    ("GO", "GOIANIA"),
    ("MA", "SAO LUIS"),
    ("MT", "CUIABA"),
    ("MS", "CAMPO GRANDE"),
    ("MG", "BELO HORIZONTE"),
    ("PA", "BELEM"),
    ("PB", "JOAO PESSOA"),
    ("PR", "CURITIBA"),
    ("PE", "RECIFE"),
    ("PI", "TERESINA"),
    ("RJ", "RIO DE JANEIRO"),
    ("RN", "NATAL"),
    ("RS", "PORTO ALEGRE"),
    ("RO", "PORTO VELHO"),
    ("RR", "BOA VISTA"),
    ("SC", "FLORIANOPOLIS"),
    ("SP", "SAO PAULO"),
    ("SE", "ARACAJU"),
    ("TO", "PALMAS"),
];

/// Trim, upper-case and strip combining marks.
pub fn normalize_name(value: &str) -> String {
    value
        .trim()
        .to_uppercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Capital of a region, if the (normalized) region is known.
pub fn capital_of(region: &str) -> Option<&'static str> {
    let region = normalize_name(region);
    CAPITALS_BY_REGION
        .iter()
        .find(|(uf, _)| *uf == region)
        .map(|(_, capital)| *capital)
}

/// Classify a destination. Unknown or empty input is `Interior`.
pub fn classify(city: &str, region: &str) -> TariffClass {
    let city = normalize_name(city);
    let region = normalize_name(region);

    if region == "DF" && city == "BRASILIA" {
        return TariffClass::Brasilia;
    }
    if !city.is_empty() && capital_of(&region) == Some(city.as_str()) {
        return TariffClass::Capital;
    }
    TariffClass::Interior
}

/// Destination to classify when a simulation forces a tariff class.
///
/// This never describes a real itinerary leg. It only produces a city/region
/// pair that `classify` maps onto the requested class:
///
/// * `Brasilia` is always `BRASILIA`/`DF`.
/// * `Capital` is the capital of the given region, or of [`DEFAULT_REGION`]
///   when the region is unknown.
/// * `Interior` keeps the given city (or `INTERIOR`), but renames it to
///   `INTERIOR <region>` when it is that region's capital.
/// * `Automatic` passes the input through, trimmed.
pub fn synthetic_destination_for_override(
    city: &str,
    region: &str,
    manual_override: ManualOverride,
) -> (String, String) {
    let city = city.trim();
    let region = region.trim().to_uppercase();

    match manual_override {
        ManualOverride::Automatic => (city.to_string(), region),
        ManualOverride::Brasilia => ("BRASILIA".to_string(), "DF".to_string()),
        ManualOverride::Capital => match capital_of(&region) {
            Some(capital) => (capital.to_string(), region),
            None => (
                capital_of(DEFAULT_REGION).unwrap_or("CURITIBA").to_string(),
                DEFAULT_REGION.to_string(),
            ),
        },
        ManualOverride::Interior => {
            let region = if region.is_empty() {
                DEFAULT_REGION.to_string()
            } else {
                region
            };
            let city = if city.is_empty() { "INTERIOR" } else { city };
            if capital_of(&region) == Some(normalize_name(city).as_str()) {
                (format!("INTERIOR {}", region), region)
            } else {
                (city.to_string(), region)
            }
        }
    }
}
