//! Advisory language generator client
//!
//! Wraps a hosted text-generation API for the farmer Q&A chat. Fails open:
//! any error produces a static fallback built from the risk scores, never
//! an error surfaced to the farmer.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{Farmer, RiskAssessment, WeatherSnapshot};

use crate::error::{AppError, AppResult};

/// Text generation client
#[derive(Clone)]
pub struct AdviceGenerator {
    http_client: Client,
    api_endpoint: String,
    api_key: String,
}

/// Everything the generator gets to ground its answer
#[derive(Debug, Clone)]
pub struct ChatContext<'a> {
    pub farmer: &'a Farmer,
    pub question: &'a str,
    pub weather: &'a WeatherSnapshot,
    pub risks: &'a RiskAssessment,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_chars: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

impl AdviceGenerator {
    pub fn new(api_endpoint: String, api_key: String) -> AppResult<Self> {
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "generator API key is not set".to_string(),
            ));
        }
        Ok(Self {
            http_client: Client::new(),
            api_endpoint,
            api_key,
        })
    }

    /// Generate a context-grounded answer to a farmer's question.
    /// Never fails; generator errors return the static fallback.
    pub async fn generate(&self, context: &ChatContext<'_>) -> String {
        let prompt = build_prompt(context);
        match self.call(&prompt).await {
            Ok(text) => text,
            Err(detail) => {
                tracing::warn!(detail = %detail, "generator unavailable, using fallback");
                fallback_message(context.farmer, context.risks)
            }
        }
    }

    async fn call(&self, prompt: &str) -> Result<String, String> {
        let request = GenerateRequest {
            prompt,
            max_chars: 200,
        };

        let response = self
            .http_client
            .post(format!("{}/generate", self.api_endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("generator returned {}", response.status()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid generator response: {}", e))?;

        Ok(body.text.trim().to_string())
    }
}

fn build_prompt(context: &ChatContext<'_>) -> String {
    let current_temp = context
        .weather
        .hourly
        .first()
        .map(|h| h.temperature_celsius)
        .unwrap_or_default();

    format!(
        "You are an agricultural expert assistant for {name}.\n\
         CONTEXT:\n\
         - District: {district}\n\
         - Crop: {crop} ({stage})\n\
         - Current temp: {temp:.1} C\n\
         - Disease risk: {disease:.0}%\n\
         - Pest risk: {pest:.0}%\n\
         - Irrigation advice: {irrigation}\n\
         QUESTION: {question}\n\
         Answer specifically for this farmer's situation. Be practical and \
         actionable. Keep the response under 200 characters. Use simple language.",
        name = context.farmer.name,
        district = context.farmer.district.as_deref().unwrap_or("unknown"),
        crop = context.farmer.crop,
        stage = context.farmer.growth_stage.as_str(),
        temp = current_temp,
        disease = context.risks.disease_risk * 100.0,
        pest = context.risks.pest_risk * 100.0,
        irrigation = context.risks.irrigation_action.as_str(),
        question = context.question,
    )
}

/// Static fallback when the generator is unreachable
pub fn fallback_message(farmer: &Farmer, risks: &RiskAssessment) -> String {
    format!(
        "URGENT: {:.0}% disease risk. {} irrigation for {}.",
        risks.disease_risk * 100.0,
        risks.irrigation_action.as_str().to_uppercase(),
        farmer.crop
    )
}
