use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::errors::CoreError;
use crate::models::advisory::{CropRecommendation, IrrigationPlan, PestDiagnosis, YieldPrediction};

/// JSON type of a single response field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Non-empty string
    Text,
    /// Number, optionally bounded (inclusive)
    Number { min: Option<f64>, max: Option<f64> },
    /// Array of strings (may be empty)
    TextList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    pub const fn number(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Number { min: None, max: None } }
    }

    pub const fn bounded(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Number { min: Some(min), max: Some(max) },
        }
    }

    pub const fn list(name: &'static str) -> Self {
        Self { name, kind: FieldKind::TextList }
    }
}

/// The JSON object shape a feature expects back from the model.
/// All declared fields are required; extra fields are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub fields: Vec<FieldSpec>,
}

impl ResponseSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Render as the OpenAPI-style schema object sent in `generationConfig.responseSchema`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let prop = match field.kind {
                FieldKind::Text => json!({ "type": "STRING" }),
                FieldKind::Number { .. } => json!({ "type": "NUMBER" }),
                FieldKind::TextList => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
            };
            properties.insert(field.name.to_string(), prop);
        }
        let required: Vec<&str> = self.fields.iter().map(|f| f.name).collect();
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    }

    /// Check that `value` is an object carrying every declared field with the right type.
    pub fn validate(&self, value: &Value) -> Result<(), CoreError> {
        let object = value
            .as_object()
            .ok_or_else(|| CoreError::SchemaMismatch("expected a JSON object".into()))?;

        for field in &self.fields {
            let v = object
                .get(field.name)
                .ok_or_else(|| CoreError::SchemaMismatch(format!("missing field '{}'", field.name)))?;

            match field.kind {
                FieldKind::Text => {
                    let s = v.as_str().ok_or_else(|| {
                        CoreError::SchemaMismatch(format!("field '{}' must be a string", field.name))
                    })?;
                    if s.trim().is_empty() {
                        return Err(CoreError::SchemaMismatch(format!(
                            "field '{}' must not be empty",
                            field.name
                        )));
                    }
                }
                FieldKind::Number { min, max } => {
                    let n = v.as_f64().ok_or_else(|| {
                        CoreError::SchemaMismatch(format!("field '{}' must be a number", field.name))
                    })?;
                    if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                        return Err(CoreError::SchemaMismatch(format!(
                            "field '{}' out of range: {n}",
                            field.name
                        )));
                    }
                }
                FieldKind::TextList => {
                    let items = v.as_array().ok_or_else(|| {
                        CoreError::SchemaMismatch(format!("field '{}' must be an array", field.name))
                    })?;
                    if items.iter().any(|item| !item.is_string()) {
                        return Err(CoreError::SchemaMismatch(format!(
                            "field '{}' must contain only strings",
                            field.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A model response type with a declared shape.
pub trait StructuredResponse: DeserializeOwned {
    fn schema() -> ResponseSchema;
}

/// Validate `value` against `T`'s declared shape, then deserialize it.
pub fn parse_response<T: StructuredResponse>(value: Value) -> Result<T, CoreError> {
    T::schema().validate(&value)?;
    serde_json::from_value(value).map_err(|e| CoreError::SchemaMismatch(e.to_string()))
}

impl StructuredResponse for PestDiagnosis {
    fn schema() -> ResponseSchema {
        ResponseSchema::new(vec![
            FieldSpec::text("diagnosis"),
            FieldSpec::text("treatment"),
            FieldSpec::list("prevention"),
        ])
    }
}

impl StructuredResponse for YieldPrediction {
    fn schema() -> ResponseSchema {
        ResponseSchema::new(vec![
            FieldSpec::bounded("predicted_yield", 0.0, f64::MAX),
            FieldSpec::text("unit"),
            FieldSpec::bounded("confidence", 0.0, 100.0),
            FieldSpec::list("positive_factors"),
            FieldSpec::list("negative_factors"),
            FieldSpec::list("recommendations"),
        ])
    }
}

impl StructuredResponse for IrrigationPlan {
    fn schema() -> ResponseSchema {
        ResponseSchema::new(vec![
            FieldSpec::text("method"),
            FieldSpec::text("frequency"),
            FieldSpec::bounded("water_per_session_liters", 0.0, f64::MAX),
            FieldSpec::list("schedule"),
            FieldSpec::list("tips"),
        ])
    }
}

impl StructuredResponse for CropRecommendation {
    fn schema() -> ResponseSchema {
        ResponseSchema::new(vec![
            FieldSpec::list("crops"),
            FieldSpec::text("rationale"),
            FieldSpec::list("tips"),
        ])
    }
}

