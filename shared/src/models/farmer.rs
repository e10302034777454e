//! Farmer roster models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{GpsCoordinates, Language};

/// A registered farmer. Created via registration; read-only to the
/// advisory pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    /// Contact number in E.164 format
    pub phone: Option<String>,
    pub whatsapp_opt_in: bool,
    pub district: Option<String>,
    pub location: GpsCoordinates,
    pub crop: String,
    pub growth_stage: GrowthStage,
    pub language: Language,
    pub created_at: DateTime<Utc>,
}

impl Farmer {
    /// Whether the farmer can be reached over the messaging channel.
    pub fn reachable(&self) -> bool {
        self.whatsapp_opt_in && self.phone.as_deref().map_or(false, |p| !p.is_empty())
    }
}

/// Crop growth stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Sowing,
    #[default]
    Vegetative,
    Flowering,
    Maturity,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Sowing => "sowing",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Maturity => "maturity",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "sowing" => GrowthStage::Sowing,
            "flowering" => GrowthStage::Flowering,
            "maturity" => GrowthStage::Maturity,
            _ => GrowthStage::Vegetative,
        }
    }
}
