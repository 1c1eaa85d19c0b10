//! Per-diem rate schedule.

use rust_decimal_macros::dec;

use super::models::{RateEntry, TariffClass};

const INTERIOR: RateEntry = RateEntry {
    full_day: dec!(290.55),
    partial_15: dec!(43.58),
    partial_30: dec!(87.17),
};

const CAPITAL: RateEntry = RateEntry {
    full_day: dec!(371.26),
    partial_15: dec!(55.69),
    partial_30: dec!(111.38),
};

const BRASILIA: RateEntry = RateEntry {
    full_day: dec!(468.12),
    partial_15: dec!(70.22),
    partial_30: dec!(140.43),
};

/// Rates for every tariff class.
pub const RATE_TABLE: [(TariffClass, RateEntry); 3] = [
    (TariffClass::Interior, INTERIOR),
    (TariffClass::Capital, CAPITAL),
    (TariffClass::Brasilia, BRASILIA),
];

/// Look up the rates for a tariff class, falling back to the interior rates.
pub fn rate_for(class: TariffClass) -> RateEntry {
    RATE_TABLE
        .iter()
        .find(|(c, _)| *c == class)
        .map(|(_, rate)| *rate)
        .unwrap_or(INTERIOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_table_values() {
        let interior = rate_for(TariffClass::Interior);
        assert_eq!(interior.full_day, dec!(290.55));
        assert_eq!(interior.partial_15, dec!(43.58));
        assert_eq!(interior.partial_30, dec!(87.17));

        let capital = rate_for(TariffClass::Capital);
        assert_eq!(capital.full_day, dec!(371.26));
        assert_eq!(capital.partial_15, dec!(55.69));
        assert_eq!(capital.partial_30, dec!(111.38));

        let brasilia = rate_for(TariffClass::Brasilia);
        assert_eq!(brasilia.full_day, dec!(468.12));
        assert_eq!(brasilia.partial_15, dec!(70.22));
        assert_eq!(brasilia.partial_30, dec!(140.43));
    }

    #[test]
    fn test_rates_increase_with_class() {
        let interior = rate_for(TariffClass::Interior);
        let capital = rate_for(TariffClass::Capital);
        let brasilia = rate_for(TariffClass::Brasilia);
        assert!(interior.full_day < capital.full_day);
        assert!(capital.full_day < brasilia.full_day);
        for rate in [interior, capital, brasilia] {
            assert!(rate.partial_15 < rate.partial_30);
            assert!(rate.partial_30 < rate.full_day);
        }
    }
}
