use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::advisory::{
    CropRecommendation, CropRecommendationRequest, IrrigationPlan, IrrigationRequest,
    PestDiagnosis, PestDiagnosisRequest, YieldPrediction, YieldPredictionRequest,
};
use crate::models::navigation::Language;
use crate::models::settings::AdvisorSettings;
use super::prompts;
use super::schema::{parse_response, StructuredResponse};
use super::traits::AdvisoryProvider;

const PROVIDER: &str = "Gemini";

/// Google Gemini `generateContent` provider.
///
/// - **Requires**: API key (settings or `FARM_ADVISOR_API_KEY`).
/// - **Output**: JSON mode (`responseMimeType: application/json`) with the
///   feature's declared `responseSchema`.
/// - One request per call. No retry.
pub struct GeminiAdvisor {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiAdvisor {
    pub fn new(settings: &AdvisorSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match settings.timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        };
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    /// Send one prompt and return the validated, typed response.
    async fn generate<T: StructuredResponse>(&self, prompt: String) -> Result<T, CoreError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CoreError::Configuration("No API key configured for Gemini".into()))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: T::schema().to_json_schema(),
            },
        };

        debug!(model = %self.model, "Sending advisory request");

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("HTTP {status}: {}", truncate(&detail, 200)),
            });
        }

        let resp: GenerateResponse = response.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse response envelope: {e}"),
        })?;

        let text = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: "Response contained no candidate text".into(),
            })?;

        let value: Value = serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| CoreError::SchemaMismatch(format!("model output is not JSON: {e}")))?;

        parse_response(value)
    }
}

/// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

// ── Gemini API request/response types ───────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AdvisoryProvider for GeminiAdvisor {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn diagnose_pest(
        &self,
        request: &PestDiagnosisRequest,
        language: Language,
    ) -> Result<PestDiagnosis, CoreError> {
        self.generate(prompts::pest_diagnosis(request, language)).await
    }

    async fn predict_yield(
        &self,
        request: &YieldPredictionRequest,
        language: Language,
    ) -> Result<YieldPrediction, CoreError> {
        self.generate(prompts::yield_prediction(request, language)).await
    }

    async fn plan_irrigation(
        &self,
        request: &IrrigationRequest,
        language: Language,
    ) -> Result<IrrigationPlan, CoreError> {
        self.generate(prompts::irrigation_plan(request, language)).await
    }

    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
        language: Language,
    ) -> Result<CropRecommendation, CoreError> {
        self.generate(prompts::crop_recommendation(request, language)).await
    }
}
