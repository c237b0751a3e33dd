//! Prompt templates for the advisory features.
//!
//! Each template fills the farmer's form values into plain-language instructions.
//! The response shape is not described here; it is sent separately as the
//! declared schema.

use crate::models::advisory::{
    CropRecommendationRequest, IrrigationRequest, PestDiagnosisRequest, YieldPredictionRequest,
};
use crate::models::navigation::Language;

const PERSONA: &str = "You are an experienced agricultural extension officer advising small farmers in India.";

fn language_line(language: Language) -> String {
    format!(
        "Write every text value in {}. Keep field names in English.",
        language.english_name()
    )
}

fn optional(label: &str, value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => format!("\n- {label}: {v}"),
        _ => String::new(),
    }
}

pub fn pest_diagnosis(request: &PestDiagnosisRequest, language: Language) -> String {
    format!(
        "{PERSONA}\n\
         Diagnose the most likely pest or disease from the observations below and give a practical treatment \
         using locally available products, followed by prevention steps.\n\
         - Crop: {crop}\n\
         - Symptoms: {symptoms}{part}{location}\n\
         {lang}",
        crop = request.crop.trim(),
        symptoms = request.symptoms.trim(),
        part = optional("Affected part", &request.affected_part),
        location = optional("Location", &request.location),
        lang = language_line(language),
    )
}

pub fn yield_prediction(request: &YieldPredictionRequest, language: Language) -> String {
    format!(
        "{PERSONA}\n\
         Predict the total harvest for this field. Report the yield as a number with its unit, \
         a confidence between 0 and 100, the factors helping and hurting the yield, and recommendations.\n\
         - Crop: {crop}\n\
         - Area: {area} acres\n\
         - Soil type: {soil}\n\
         - Season: {season}\n\
         - Expected rainfall: {rain} mm\n\
         - Average temperature: {temp} °C{irrigation}{fertilizer}\n\
         {lang}",
        crop = request.crop.trim(),
        area = request.area_acres,
        soil = request.soil_type.trim(),
        season = request.season.trim(),
        rain = request.rainfall_mm,
        temp = request.temperature_c,
        irrigation = optional("Irrigation", &request.irrigation),
        fertilizer = optional("Fertilizer", &request.fertilizer),
        lang = language_line(language),
    )
}

pub fn irrigation_plan(request: &IrrigationRequest, language: Language) -> String {
    format!(
        "{PERSONA}\n\
         Plan irrigation for the next two weeks: recommend a method, how often to irrigate, \
         litres of water per session for the whole area, a day-by-day schedule and water-saving tips.\n\
         - Crop: {crop}\n\
         - Growth stage: {stage}\n\
         - Soil type: {soil}\n\
         - Area: {area} acres\n\
         - Water source: {source}\n\
         - Rainfall in the last week: {rain} mm\n\
         - Current temperature: {temp} °C\n\
         {lang}",
        crop = request.crop.trim(),
        stage = request.growth_stage.trim(),
        soil = request.soil_type.trim(),
        area = request.area_acres,
        source = request.water_source.trim(),
        rain = request.recent_rainfall_mm,
        temp = request.temperature_c,
        lang = language_line(language),
    )
}

pub fn crop_recommendation(request: &CropRecommendationRequest, language: Language) -> String {
    format!(
        "{PERSONA}\n\
         Recommend the most suitable crops for these conditions, best first, explain why, \
         and give sowing tips.\n\
         - Soil type: {soil}\n\
         - Soil pH: {ph}\n\
         - Annual rainfall: {rain} mm\n\
         - Average temperature: {temp} °C\n\
         - Season: {season}\n\
         - Region: {region}\n\
         {lang}",
        soil = request.soil_type.trim(),
        ph = request.soil_ph,
        rain = request.rainfall_mm,
        temp = request.temperature_c,
        season = request.season.trim(),
        region = request.region.trim(),
        lang = language_line(language),
    )
}
