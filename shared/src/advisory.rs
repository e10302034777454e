//! Advisory composition: turns a risk assessment into a structured,
//! human-readable recommendation and renders the outbound message text.
//!
//! Composition is deterministic and does no I/O. Rules accumulate: an
//! irrigation action, a disease action and a pest action can all fire for
//! the same farmer; the fallback fires only when nothing else did.

use serde::{Deserialize, Serialize};

use crate::models::Farmer;
use crate::risk::{IrrigationAction, RiskAssessment};
use crate::types::Language;

/// Risk at or above this adds a dedicated action and raises urgency to high
pub const ACTION_RISK_THRESHOLD: f64 = 0.7;

/// Risk at or above this raises urgency to at least medium
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// The structured advisory produced per farmer per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub language: Language,
    pub headline: String,
    pub actions: Vec<AdvisoryAction>,
    /// Summary of the raw risk inputs, kept for audit rather than the
    /// farmer-facing message
    pub rationale: String,
    pub urgency: Urgency,
}

/// One recommended action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryAction {
    pub what: String,
    pub when: String,
    pub how_much: Option<String>,
    pub caution: Option<String>,
}

impl AdvisoryAction {
    fn new(what: &str, when: &str) -> Self {
        Self {
            what: what.to_string(),
            when: when.to_string(),
            how_much: None,
            caution: None,
        }
    }

    fn how_much(mut self, v: &str) -> Self {
        self.how_much = Some(v.to_string());
        self
    }

    fn caution(mut self, v: &str) -> Self {
        self.caution = Some(v.to_string());
        self
    }
}

/// Advisory urgency level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Compose the advisory for one farmer from their risk assessment.
pub fn compose(farmer: &Farmer, assessment: &RiskAssessment) -> Advisory {
    let mut actions = Vec::new();

    match assessment.irrigation_action {
        IrrigationAction::Skip => {
            actions.push(
                AdvisoryAction::new("Skip irrigation", "today")
                    .caution("rain likely in next 48h"),
            );
        }
        IrrigationAction::Irrigate => {
            actions.push(
                AdvisoryAction::new("Irrigate field", "today evening or early morning")
                    .how_much("light irrigation (2-3 cm)")
                    .caution("avoid waterlogging"),
            );
        }
        IrrigationAction::Monitor => {}
    }

    if assessment.disease_risk >= ACTION_RISK_THRESHOLD {
        actions.push(
            AdvisoryAction::new("inspect for fungal disease, remove infected parts", "today")
                .caution("prefer low-impact treatment first"),
        );
    }

    if assessment.pest_risk >= ACTION_RISK_THRESHOLD {
        actions.push(
            AdvisoryAction::new("install traps, monitor twice daily", "next 48h")
                .how_much("5-8 traps/acre")
                .caution("spray only if threshold crossed"),
        );
    }

    if actions.is_empty() {
        actions.push(AdvisoryAction::new("conditions normal", "this week").caution("keep monitoring"));
    }

    let area = farmer.district.as_deref().unwrap_or("your area");
    let headline = format!("{} advisory for {}", title_case(&farmer.crop), area);

    let rationale = format!(
        "disease {:.3} | pest {:.3} | irrigation: {}",
        assessment.disease_risk,
        assessment.pest_risk,
        assessment.irrigation_action.as_str()
    );

    Advisory {
        language: farmer.language.clone(),
        headline,
        actions,
        rationale,
        urgency: urgency_for(assessment),
    }
}

/// Render the advisory to the plain-text outbound message.
pub fn render_message(advisory: &Advisory) -> String {
    let mut lines = vec![advisory.headline.clone(), format!("Risk -> {}", advisory.rationale)];
    for action in &advisory.actions {
        lines.push(format!("- {} ({})", action.what, action.when));
    }
    lines.join("\n")
}

fn urgency_for(assessment: &RiskAssessment) -> Urgency {
    let peak = assessment.disease_risk.max(assessment.pest_risk);
    if peak >= ACTION_RISK_THRESHOLD {
        Urgency::High
    } else if peak >= MEDIUM_RISK_THRESHOLD {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GpsCoordinates;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn farmer(crop: &str, district: Option<&str>) -> Farmer {
        Farmer {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            phone: Some("+919876543210".to_string()),
            whatsapp_opt_in: true,
            district: district.map(str::to_string),
            location: GpsCoordinates::new(Decimal::new(19076, 3), Decimal::new(72877, 3)),
            crop: crop.to_string(),
            growth_stage: Default::default(),
            language: Language::English,
            created_at: Utc::now(),
        }
    }

    fn assessment(disease: f64, pest: f64, irrigation: IrrigationAction) -> RiskAssessment {
        RiskAssessment {
            disease_risk: disease,
            pest_risk: pest,
            irrigation_action: irrigation,
        }
    }

    #[test]
    fn test_high_disease_yields_single_inspection_action() {
        let advisory = compose(
            &farmer("rice", Some("Pune")),
            &assessment(0.8, 0.2, IrrigationAction::Monitor),
        );
        assert_eq!(advisory.actions.len(), 1);
        assert!(advisory.actions[0].what.contains("fungal disease"));
        assert_eq!(advisory.urgency, Urgency::High);
    }

    #[test]
    fn test_quiet_conditions_yield_only_fallback() {
        let advisory = compose(
            &farmer("rice", Some("Pune")),
            &assessment(0.1, 0.1, IrrigationAction::Monitor),
        );
        assert_eq!(advisory.actions.len(), 1);
        assert_eq!(advisory.actions[0].what, "conditions normal");
        assert_eq!(advisory.urgency, Urgency::Low);
    }

    #[test]
    fn test_actions_accumulate() {
        let advisory = compose(
            &farmer("maize", Some("Nashik")),
            &assessment(0.75, 0.72, IrrigationAction::Irrigate),
        );
        // irrigation + disease + pest, in that order; no fallback
        assert_eq!(advisory.actions.len(), 3);
        assert_eq!(advisory.actions[0].what, "Irrigate field");
        assert!(advisory.actions[1].what.contains("fungal"));
        assert!(advisory.actions[2].what.contains("traps"));
    }

    #[test]
    fn test_skip_action_and_caution() {
        let advisory = compose(
            &farmer("rice", None),
            &assessment(0.2, 0.2, IrrigationAction::Skip),
        );
        assert_eq!(advisory.actions[0].what, "Skip irrigation");
        assert_eq!(
            advisory.actions[0].caution.as_deref(),
            Some("rain likely in next 48h")
        );
    }

    #[test]
    fn test_headline_title_cases_crop_and_defaults_district() {
        let advisory = compose(
            &farmer("rice", None),
            &assessment(0.1, 0.1, IrrigationAction::Monitor),
        );
        assert_eq!(advisory.headline, "Rice advisory for your area");

        let advisory = compose(
            &farmer("sugar cane", Some("Kolhapur")),
            &assessment(0.1, 0.1, IrrigationAction::Monitor),
        );
        assert_eq!(advisory.headline, "Sugar Cane advisory for Kolhapur");
    }

    #[test]
    fn test_urgency_bands() {
        let low = compose(&farmer("rice", None), &assessment(0.39, 0.1, IrrigationAction::Monitor));
        let medium = compose(&farmer("rice", None), &assessment(0.4, 0.1, IrrigationAction::Monitor));
        let high = compose(&farmer("rice", None), &assessment(0.1, 0.7, IrrigationAction::Monitor));
        assert_eq!(low.urgency, Urgency::Low);
        assert_eq!(medium.urgency, Urgency::Medium);
        assert_eq!(high.urgency, Urgency::High);
    }

    #[test]
    fn test_render_message_format() {
        let advisory = compose(
            &farmer("rice", Some("Pune")),
            &assessment(0.8, 0.2, IrrigationAction::Skip),
        );
        let text = render_message(&advisory);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Rice advisory for Pune");
        assert!(lines[1].starts_with("Risk -> disease 0.800 | pest 0.200"));
        assert_eq!(lines[2], "- Skip irrigation (today)");
        assert_eq!(lines[3], "- inspect for fungal disease, remove infected parts (today)");
    }

    #[test]
    fn test_rationale_records_all_three_inputs() {
        let advisory = compose(
            &farmer("rice", None),
            &assessment(0.123, 0.456, IrrigationAction::Irrigate),
        );
        assert_eq!(advisory.rationale, "disease 0.123 | pest 0.456 | irrigation: irrigate");
    }
}
