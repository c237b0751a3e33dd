use std::future::Future;

use tracing::{debug, error};

use crate::errors::CoreError;
use crate::models::advisory::{
    CropRecommendation, CropRecommendationRequest, IrrigationPlan, IrrigationRequest,
    PestDiagnosis, PestDiagnosisRequest, YieldPrediction, YieldPredictionRequest,
};
use crate::models::navigation::Language;
use crate::providers::traits::AdvisoryProvider;

// Form limits
const MAX_AREA_ACRES: f64 = 10_000.0;
const MAX_RAINFALL_MM: f64 = 5_000.0;
const MIN_TEMPERATURE_C: f64 = -20.0;
const MAX_TEMPERATURE_C: f64 = 60.0;
const MAX_TEXT_LEN: usize = 500;

/// Runs the advisory features: validate the form, ask the provider once, and turn
/// any provider failure into the generic `CoreError::AnalysisFailed`.
///
/// Invalid input is rejected with a per-field error before the provider is called.
pub struct AdvisoryService {
    provider: Box<dyn AdvisoryProvider>,
}

impl AdvisoryService {
    pub fn new(provider: Box<dyn AdvisoryProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn diagnose_pest(
        &self,
        request: &PestDiagnosisRequest,
        language: Language,
    ) -> Result<PestDiagnosis, CoreError> {
        required_text("crop", &request.crop)?;
        required_text("symptoms", &request.symptoms)?;
        optional_text("affected_part", &request.affected_part)?;
        optional_text("location", &request.location)?;

        self.run("pest_diagnosis", self.provider.diagnose_pest(request, language))
            .await
    }

    pub async fn predict_yield(
        &self,
        request: &YieldPredictionRequest,
        language: Language,
    ) -> Result<YieldPrediction, CoreError> {
        required_text("crop", &request.crop)?;
        required_text("soil_type", &request.soil_type)?;
        required_text("season", &request.season)?;
        area("area_acres", request.area_acres)?;
        in_range("rainfall_mm", request.rainfall_mm, 0.0, MAX_RAINFALL_MM)?;
        in_range("temperature_c", request.temperature_c, MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)?;
        optional_text("irrigation", &request.irrigation)?;
        optional_text("fertilizer", &request.fertilizer)?;

        self.run("yield_prediction", self.provider.predict_yield(request, language))
            .await
    }

    pub async fn plan_irrigation(
        &self,
        request: &IrrigationRequest,
        language: Language,
    ) -> Result<IrrigationPlan, CoreError> {
        required_text("crop", &request.crop)?;
        required_text("soil_type", &request.soil_type)?;
        required_text("growth_stage", &request.growth_stage)?;
        required_text("water_source", &request.water_source)?;
        area("area_acres", request.area_acres)?;
        in_range("recent_rainfall_mm", request.recent_rainfall_mm, 0.0, MAX_RAINFALL_MM)?;
        in_range("temperature_c", request.temperature_c, MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)?;

        self.run("irrigation_plan", self.provider.plan_irrigation(request, language))
            .await
    }

    pub async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
        language: Language,
    ) -> Result<CropRecommendation, CoreError> {
        required_text("soil_type", &request.soil_type)?;
        required_text("season", &request.season)?;
        required_text("region", &request.region)?;
        in_range("soil_ph", request.soil_ph, 0.0, 14.0)?;
        in_range("rainfall_mm", request.rainfall_mm, 0.0, MAX_RAINFALL_MM)?;
        in_range("temperature_c", request.temperature_c, MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)?;

        self.run("crop_recommendation", self.provider.recommend_crops(request, language))
            .await
    }

    /// Await the provider call and hide its error behind `AnalysisFailed`.
    async fn run<T>(
        &self,
        feature: &str,
        call: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        debug!(feature, provider = self.provider.name(), "Requesting analysis");
        call.await.map_err(|e| {
            error!(feature, provider = self.provider.name(), error = %e, "Analysis failed");
            CoreError::AnalysisFailed
        })
    }
}

// ── Form validation ─────────────────────────────────────────────────

fn required_text(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_field(field, "is required"));
    }
    max_len(field, trimmed)
}

fn optional_text(field: &str, value: &Option<String>) -> Result<(), CoreError> {
    match value {
        Some(v) => max_len(field, v.trim()),
        None => Ok(()),
    }
}

fn max_len(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::invalid_field(
            field,
            format!("must be at most {MAX_TEXT_LEN} characters"),
        ));
    }
    Ok(())
}

fn area(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 || value > MAX_AREA_ACRES {
        return Err(CoreError::invalid_field(
            field,
            format!("must be greater than 0 and at most {MAX_AREA_ACRES}"),
        ));
    }
    Ok(())
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < min || value > max {
        return Err(CoreError::invalid_field(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(())
}
