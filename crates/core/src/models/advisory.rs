use serde::{Deserialize, Serialize};

// ── Requests (form input) ───────────────────────────────────────────

/// Pest / disease diagnosis form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestDiagnosisRequest {
    /// Crop name (e.g., "Wheat", "Tomato")
    pub crop: String,

    /// What the farmer sees: spots, wilting, insects, ...
    pub symptoms: String,

    /// Leaf, stem, root, fruit, ...
    #[serde(default)]
    pub affected_part: Option<String>,

    /// District or state, helps with regional pests
    #[serde(default)]
    pub location: Option<String>,
}

/// Yield prediction form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPredictionRequest {
    pub crop: String,
    pub area_acres: f64,
    pub soil_type: String,
    pub season: String,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    #[serde(default)]
    pub irrigation: Option<String>,
    #[serde(default)]
    pub fertilizer: Option<String>,
}

/// Irrigation planner form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRequest {
    pub crop: String,
    pub soil_type: String,
    /// Seedling, vegetative, flowering, ...
    pub growth_stage: String,
    pub area_acres: f64,
    /// Canal, borewell, rain-fed pond, ...
    pub water_source: String,
    pub recent_rainfall_mm: f64,
    pub temperature_c: f64,
}

/// Crop recommendation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendationRequest {
    pub soil_type: String,
    pub soil_ph: f64,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub season: String,
    pub region: String,
}

// ── Responses (validated model output) ──────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestDiagnosis {
    /// Most likely pest or disease
    pub diagnosis: String,
    /// What to do now
    pub treatment: String,
    /// How to avoid it next season
    pub prevention: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    /// Expected total yield for the given area
    pub predicted_yield: f64,
    /// Unit of `predicted_yield` (e.g., "quintals")
    pub unit: String,
    /// Model confidence, 0–100
    pub confidence: f64,
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPlan {
    /// Drip, sprinkler, flood, furrow, ...
    pub method: String,
    /// How often to irrigate (free text, e.g. "every 4 days")
    pub frequency: String,
    /// Water per session for the whole area
    pub water_per_session_liters: f64,
    /// Step-by-step schedule lines
    pub schedule: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    /// Suitable crops, best first
    pub crops: Vec<String>,
    pub rationale: String,
    pub tips: Vec<String>,
}
