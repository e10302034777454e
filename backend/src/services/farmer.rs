//! Farmer roster service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::pipeline::RosterSource;
use shared::{
    validate_coordinates, validate_crop_name, validate_phone_e164, Farmer, GpsCoordinates,
    GrowthStage, Language,
};

/// Service for registering and listing farmers
#[derive(Clone)]
pub struct FarmerService {
    db: PgPool,
}

/// Database row for a farmer
#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    whatsapp_opt_in: bool,
    district: Option<String>,
    latitude: Decimal,
    longitude: Decimal,
    crop: String,
    growth_stage: String,
    language: String,
    created_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            name: row.name,
            phone: row.phone,
            whatsapp_opt_in: row.whatsapp_opt_in,
            district: row.district,
            location: GpsCoordinates::new(row.latitude, row.longitude),
            crop: row.crop,
            growth_stage: GrowthStage::from_str_or_default(&row.growth_stage),
            language: Language::from_code(&row.language),
            created_at: row.created_at,
        }
    }
}

/// Input for registering a farmer
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFarmerInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp_opt_in: bool,
    pub district: Option<String>,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub crop: String,
    pub growth_stage: Option<String>,
    pub language: Option<String>,
}

const SELECT_COLUMNS: &str = "id, name, phone, whatsapp_opt_in, district, latitude, longitude, \
                              crop, growth_stage, language, created_at";

impl FarmerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new farmer
    pub async fn register(&self, input: RegisterFarmerInput) -> AppResult<Farmer> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("Farmer name is required".to_string()));
        }
        if let Some(phone) = input.phone.as_deref() {
            validate_phone_e164(phone).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if input.whatsapp_opt_in && input.phone.is_none() {
            return Err(AppError::Validation(
                "WhatsApp opt-in requires a phone number".to_string(),
            ));
        }
        validate_coordinates(input.latitude, input.longitude)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validate_crop_name(&input.crop).map_err(|e| AppError::Validation(e.to_string()))?;

        let growth_stage = input
            .growth_stage
            .as_deref()
            .map(GrowthStage::from_str_or_default)
            .unwrap_or_default();
        let language = input
            .language
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_default();

        let row = sqlx::query_as::<_, FarmerRow>(&format!(
            r#"
            INSERT INTO farmers (
                name, phone, whatsapp_opt_in, district, latitude, longitude,
                crop, growth_stage, language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(&input.phone)
        .bind(input.whatsapp_opt_in)
        .bind(&input.district)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.crop.trim().to_lowercase())
        .bind(growth_stage.as_str())
        .bind(language.code())
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a farmer by ID
    pub async fn get_farmer(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        let row = sqlx::query_as::<_, FarmerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM farmers WHERE id = $1"
        ))
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }

    /// List all registered farmers, oldest first
    pub async fn list(&self) -> AppResult<Vec<Farmer>> {
        let rows = sqlx::query_as::<_, FarmerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM farmers ORDER BY created_at ASC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[async_trait]
impl RosterSource for FarmerService {
    async fn list_farmers(&self) -> AppResult<Vec<Farmer>> {
        self.list().await
    }
}
