use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::advisory::{
    CropRecommendation, CropRecommendationRequest, IrrigationPlan, IrrigationRequest,
    PestDiagnosis, PestDiagnosisRequest, YieldPrediction, YieldPredictionRequest,
};
use crate::models::navigation::Language;

/// Capability interface over the hosted language model, one method per advisory feature.
///
/// The production implementation formats a prompt and validates the model's JSON
/// against the declared response shape. Tests substitute deterministic fixtures.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AdvisoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Identify a pest or disease from visible symptoms.
    async fn diagnose_pest(
        &self,
        request: &PestDiagnosisRequest,
        language: Language,
    ) -> Result<PestDiagnosis, CoreError>;

    /// Estimate harvest for a field.
    async fn predict_yield(
        &self,
        request: &YieldPredictionRequest,
        language: Language,
    ) -> Result<YieldPrediction, CoreError>;

    /// Build an irrigation schedule.
    async fn plan_irrigation(
        &self,
        request: &IrrigationRequest,
        language: Language,
    ) -> Result<IrrigationPlan, CoreError>;

    /// Suggest crops for the given soil and climate.
    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
        language: Language,
    ) -> Result<CropRecommendation, CoreError>;
}
