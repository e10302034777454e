//! Risk engine: pure, stateless scoring of derived signals.
//!
//! Each index is a weighted sum of its inputs passed through a logistic
//! sharpening transform `sigmoid(4 * (score - 0.5))`, which pushes values
//! away from 0.5 toward the extremes so the index reads decisively.
//! Inputs are expected to come from the feature extractor; they are not
//! re-validated here.

use serde::{Deserialize, Serialize};

use crate::features::DerivedSignals;

/// The three outputs of one scoring pass
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    /// Fungal disease index, 0.0..=1.0
    pub disease_risk: f64,
    /// Insect/pest index, 0.0..=1.0
    pub pest_risk: f64,
    pub irrigation_action: IrrigationAction,
}

/// Categorical irrigation decision
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationAction {
    Skip,
    Irrigate,
    Monitor,
}

impl IrrigationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationAction::Skip => "skip",
            IrrigationAction::Irrigate => "irrigate",
            IrrigationAction::Monitor => "monitor",
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn sharpen(score: f64) -> f64 {
    round3(sigmoid(4.0 * (score - 0.5)))
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn ind(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Fungal disease index from wet-hour load, temperature window and
/// recent rainfall (>= 5 mm in the last 24h counts).
pub fn compute_disease_index(wet_hours_24: u32, temp_window_ok: bool, rain_last24_mm: f64) -> f64 {
    let score = 0.5 * (wet_hours_24 as f64 / 24.0)
        + 0.3 * ind(temp_window_ok)
        + 0.2 * ind(rain_last24_mm >= 5.0);
    sharpen(score)
}

/// Insect/pest index from temperature window, recent rain, upcoming dry
/// spell and wind.
pub fn compute_pest_index(
    temp_window_ok: bool,
    rain_recent: bool,
    dry_spell_forecast: bool,
    wind_ok: bool,
) -> f64 {
    let score = 0.4 * ind(temp_window_ok)
        + 0.3 * ind(rain_recent)
        + 0.2 * ind(dry_spell_forecast)
        + 0.1 * ind(wind_ok);
    sharpen(score)
}

/// Irrigation decision. Skip takes precedence over irrigate: likely rain
/// in the next 48h overrides even a high water need.
pub fn decide_irrigation(rain_next48_prob: f64, water_need_proxy: f64) -> IrrigationAction {
    if rain_next48_prob >= 0.6 {
        IrrigationAction::Skip
    } else if water_need_proxy > 0.5 {
        IrrigationAction::Irrigate
    } else {
        IrrigationAction::Monitor
    }
}

/// Score one set of derived signals.
pub fn assess(signals: &DerivedSignals) -> RiskAssessment {
    RiskAssessment {
        disease_risk: compute_disease_index(
            signals.wet_hours_24,
            signals.temp_window_ok,
            signals.rain_last24_mm,
        ),
        pest_risk: compute_pest_index(
            signals.temp_window_ok,
            signals.rain_recent,
            signals.dry_spell_forecast,
            signals.wind_ok,
        ),
        irrigation_action: decide_irrigation(signals.rain_next48_prob, signals.water_need_proxy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Sharpening caps the reachable index range at sigmoid(+-2):
        /// every disease index lands in [0.119, 0.881]
        #[test]
        fn prop_disease_index_within_sharpened_range(
            wet_hours in 0u32..=24,
            temp_ok in any::<bool>(),
            rain in 0.0..=120.0f64
        ) {
            let index = compute_disease_index(wet_hours, temp_ok, rain);
            prop_assert!((0.119..=0.881).contains(&index));
        }

        /// Same cap for the pest index
        #[test]
        fn prop_pest_index_within_sharpened_range(
            temp_ok in any::<bool>(),
            rain_recent in any::<bool>(),
            dry_spell in any::<bool>(),
            wind_ok in any::<bool>()
        ) {
            let index = compute_pest_index(temp_ok, rain_recent, dry_spell, wind_ok);
            prop_assert!((0.119..=0.881).contains(&index));
        }
    }

    #[test]
    fn test_disease_index_saturated_signals() {
        // Raw weighted score 1.0 maps to sigmoid(2) = 0.881
        let index = compute_disease_index(24, true, 10.0);
        assert_eq!(index, 0.881);
    }

    #[test]
    fn test_disease_index_all_zero_signals() {
        // Raw weighted score 0.0 maps to sigmoid(-2) = 0.119
        let index = compute_disease_index(0, false, 0.0);
        assert_eq!(index, 0.119);
    }

    #[test]
    fn test_disease_index_rain_indicator_threshold() {
        // 5 mm is the inclusive threshold for the rain term
        let below = compute_disease_index(0, false, 4.9);
        let at = compute_disease_index(0, false, 5.0);
        assert!(at > below);
    }

    #[test]
    fn test_pest_index_extremes() {
        assert_eq!(compute_pest_index(true, true, true, true), 0.881);
        assert_eq!(compute_pest_index(false, false, false, false), 0.119);
    }

    #[test]
    fn test_sharpening_symmetric_around_center() {
        // A balanced raw score stays at 0.5, and equal raw offsets map
        // to symmetric indices
        assert_eq!(compute_pest_index(false, true, true, false), 0.5);
        let high = compute_pest_index(true, true, false, false); // raw 0.7
        let low = compute_pest_index(false, false, true, true); // raw 0.3
        assert!((high + low - 1.0).abs() < 1e-9);
        assert!(high > 0.5 && low < 0.5);
    }

    #[test]
    fn test_irrigation_skip_takes_precedence() {
        assert_eq!(decide_irrigation(0.6, 0.9), IrrigationAction::Skip);
    }

    #[test]
    fn test_irrigation_irrigate_on_high_water_need() {
        assert_eq!(decide_irrigation(0.3, 0.6), IrrigationAction::Irrigate);
    }

    #[test]
    fn test_irrigation_monitor_otherwise() {
        assert_eq!(decide_irrigation(0.3, 0.4), IrrigationAction::Monitor);
        // Boundary: 0.5 water need is not enough to irrigate
        assert_eq!(decide_irrigation(0.0, 0.5), IrrigationAction::Monitor);
    }

    #[test]
    fn test_indices_rounded_to_3_decimals() {
        let index = compute_disease_index(7, true, 2.0);
        assert_eq!(index, (index * 1000.0).round() / 1000.0);
    }

    #[test]
    fn test_assess_wires_all_signals() {
        let signals = DerivedSignals {
            wet_hours_24: 24,
            rain_last24_mm: 12.0,
            temp_window_ok: true,
            rain_recent: true,
            dry_spell_forecast: false,
            wind_ok: true,
            rain_next48_prob: 0.7,
            water_need_proxy: 0.9,
        };
        let assessment = assess(&signals);
        assert!(assessment.disease_risk > 0.85);
        assert!(assessment.pest_risk > 0.7);
        assert_eq!(assessment.irrigation_action, IrrigationAction::Skip);
    }
}
