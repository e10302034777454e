//! Tests for the risk engine
//! Verifies index bounds, monotonicity and the irrigation decision order

use proptest::prelude::*;
use shared::{
    assess, compute_disease_index, compute_pest_index, decide_irrigation, derive_signals,
    DailyForecast, DerivedSignals, HourlyForecast, IrrigationAction, WeatherSnapshot,
};

fn probability_strategy() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

fn rain_strategy() -> impl Strategy<Value = f64> {
    0.0..=120.0f64
}

// =============================================================================
// Index bounds and rounding
// =============================================================================

mod index_bounds {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Disease index always lands in [0, 1] regardless of inputs
        #[test]
        fn prop_disease_index_bounded(
            wet_hours in 0u32..=24,
            temp_ok in any::<bool>(),
            rain in rain_strategy()
        ) {
            let index = compute_disease_index(wet_hours, temp_ok, rain);
            prop_assert!((0.0..=1.0).contains(&index));
        }

        /// Pest index always lands in [0, 1]
        #[test]
        fn prop_pest_index_bounded(
            temp_ok in any::<bool>(),
            rain_recent in any::<bool>(),
            dry_spell in any::<bool>(),
            wind_ok in any::<bool>()
        ) {
            let index = compute_pest_index(temp_ok, rain_recent, dry_spell, wind_ok);
            prop_assert!((0.0..=1.0).contains(&index));
        }

        /// Indices carry at most three decimal places
        #[test]
        fn prop_indices_rounded(
            wet_hours in 0u32..=24,
            temp_ok in any::<bool>(),
            rain in rain_strategy()
        ) {
            let index = compute_disease_index(wet_hours, temp_ok, rain);
            let rescaled = index * 1000.0;
            prop_assert!((rescaled - rescaled.round()).abs() < 1e-9);
        }

        /// More wet hours never lowers the disease index
        #[test]
        fn prop_disease_monotonic_in_wet_hours(
            wet_hours in 0u32..24,
            temp_ok in any::<bool>(),
            rain in rain_strategy()
        ) {
            let lower = compute_disease_index(wet_hours, temp_ok, rain);
            let higher = compute_disease_index(wet_hours + 1, temp_ok, rain);
            prop_assert!(higher >= lower);
        }
    }

    #[test]
    fn saturated_and_empty_extremes() {
        // The sharpening transform caps the reachable range at
        // sigmoid(+-2), not at 0 and 1
        assert_eq!(compute_disease_index(24, true, 10.0), 0.881);
        assert_eq!(compute_disease_index(0, false, 0.0), 0.119);
        assert_eq!(compute_pest_index(true, true, true, true), 0.881);
        assert_eq!(compute_pest_index(false, false, false, false), 0.119);
    }
}

// =============================================================================
// Irrigation decision
// =============================================================================

mod irrigation_decision {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Likely rain always wins: skip regardless of water need
        #[test]
        fn prop_skip_overrides_water_need(
            prob in 0.6..=1.0f64,
            need in probability_strategy()
        ) {
            prop_assert_eq!(decide_irrigation(prob, need), IrrigationAction::Skip);
        }

        /// Without likely rain, high water need means irrigate
        #[test]
        fn prop_irrigate_below_rain_threshold(
            prob in 0.0..0.6f64,
            need in 0.5f64..=1.0
        ) {
            prop_assume!(need > 0.5);
            prop_assert_eq!(decide_irrigation(prob, need), IrrigationAction::Irrigate);
        }

        /// Quiet conditions always land on monitor
        #[test]
        fn prop_monitor_otherwise(
            prob in 0.0..0.6f64,
            need in 0.0..=0.5f64
        ) {
            prop_assert_eq!(decide_irrigation(prob, need), IrrigationAction::Monitor);
        }
    }
}

// =============================================================================
// End-to-end scoring from a raw forecast
// =============================================================================

mod forecast_to_assessment {
    use super::*;

    fn hour(temp: f64, humidity: i32, rain: f64) -> HourlyForecast {
        HourlyForecast {
            temperature_celsius: temp,
            humidity_percent: Some(humidity),
            rain_1h_mm: Some(rain),
            wind_speed_mps: Some(2.0),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any 48h forecast yields bounded risks and a defined action
        #[test]
        fn prop_assessment_defined_for_any_forecast(
            temp in -5.0..=48.0f64,
            humidity in 0i32..=100,
            rain in 0.0..=20.0f64,
            pop in probability_strategy(),
            tmax in 10.0..=48.0f64
        ) {
            let hourly: Vec<_> = (0..48).map(|_| hour(temp, humidity, rain)).collect();
            let daily = vec![
                DailyForecast { temp_max_celsius: tmax, precipitation_probability: pop };
                4
            ];
            let signals = derive_signals(&WeatherSnapshot::new(hourly, daily), "rice");
            let assessment = assess(&signals);
            prop_assert!((0.0..=1.0).contains(&assessment.disease_risk));
            prop_assert!((0.0..=1.0).contains(&assessment.pest_risk));
        }
    }

    #[test]
    fn humid_warm_forecast_scores_high_disease_for_rice() {
        let hourly: Vec<_> = (0..48).map(|_| hour(26.0, 92, 1.0)).collect();
        let daily = vec![
            DailyForecast {
                temp_max_celsius: 30.0,
                precipitation_probability: 0.2,
            };
            4
        ];
        let signals = derive_signals(&WeatherSnapshot::new(hourly, daily), "rice");
        assert_eq!(signals.wet_hours_24, 24);
        assert!(signals.temp_window_ok);

        let assessment = assess(&signals);
        assert!(assessment.disease_risk > 0.8);
    }

    #[test]
    fn empty_forecast_scores_conservatively() {
        let signals = derive_signals(&WeatherSnapshot::new(vec![], vec![]), "rice");
        let assessment = assess(&signals);
        assert_eq!(assessment.disease_risk, 0.119);
        assert_eq!(assessment.irrigation_action, IrrigationAction::Monitor);
    }

    #[test]
    fn assessment_is_deterministic() {
        let signals = DerivedSignals {
            wet_hours_24: 10,
            rain_last24_mm: 6.0,
            temp_window_ok: true,
            rain_recent: true,
            dry_spell_forecast: false,
            wind_ok: true,
            rain_next48_prob: 0.4,
            water_need_proxy: 0.55,
        };
        assert_eq!(assess(&signals), assess(&signals));
    }
}
