// ═══════════════════════════════════════════════════════════════════
// Provider Tests: response schemas, prompts, Gemini over a mock server
// ═══════════════════════════════════════════════════════════════════

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use farm_advisor_core::errors::CoreError;
use farm_advisor_core::models::advisory::{
    CropRecommendation, CropRecommendationRequest, IrrigationPlan, PestDiagnosis,
    PestDiagnosisRequest, YieldPrediction, YieldPredictionRequest,
};
use farm_advisor_core::models::navigation::Language;
use farm_advisor_core::models::settings::AdvisorSettings;
use farm_advisor_core::providers::gemini::GeminiAdvisor;
use farm_advisor_core::providers::prompts;
use farm_advisor_core::providers::schema::{
    parse_response, FieldSpec, ResponseSchema, StructuredResponse,
};
use farm_advisor_core::providers::traits::AdvisoryProvider;
use farm_advisor_core::services::advisory_service::AdvisoryService;

const GENERATE_PATH: &str = "/models/test-model:generateContent";

fn pest_request() -> PestDiagnosisRequest {
    PestDiagnosisRequest {
        crop: "Cotton".into(),
        symptoms: "Holes in bolls, pink larvae inside".into(),
        affected_part: Some("Boll".into()),
        location: Some("Vidarbha".into()),
    }
}

fn yield_request() -> YieldPredictionRequest {
    YieldPredictionRequest {
        crop: "Paddy".into(),
        area_acres: 3.0,
        soil_type: "Clay".into(),
        season: "Kharif".into(),
        rainfall_mm: 1100.0,
        temperature_c: 29.0,
        irrigation: None,
        fertilizer: Some("Urea + DAP".into()),
    }
}

fn settings_for(server: &MockServer) -> AdvisorSettings {
    AdvisorSettings {
        base_url: server.uri(),
        model: "test-model".into(),
        api_key: Some("test-key".into()),
        timeout_secs: Some(5),
    }
}

/// Wrap the model's text output in a `generateContent` response envelope.
fn envelope(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

// ═══════════════════════════════════════════════════════════════════
// ResponseSchema
// ═══════════════════════════════════════════════════════════════════

mod schema {
    use super::*;

    fn sample_schema() -> ResponseSchema {
        ResponseSchema::new(vec![
            FieldSpec::text("name"),
            FieldSpec::bounded("score", 0.0, 10.0),
            FieldSpec::number("weight"),
            FieldSpec::list("notes"),
        ])
    }

    #[test]
    fn accepts_well_formed_object() {
        let value = json!({ "name": "x", "score": 3, "weight": -1.5, "notes": [], "extra": true });
        assert!(sample_schema().validate(&value).is_ok());
    }

    #[test]
    fn rejects_non_object() {
        let err = sample_schema().validate(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch(_)));
    }

    #[test]
    fn rejects_missing_field() {
        let err = sample_schema()
            .validate(&json!({ "name": "x", "score": 3, "weight": 1 }))
            .unwrap_err();
        assert!(err.to_string().contains("missing field 'notes'"));
    }

    #[test]
    fn rejects_empty_text() {
        let err = sample_schema()
            .validate(&json!({ "name": "  ", "score": 3, "weight": 1, "notes": [] }))
            .unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn rejects_out_of_range_number() {
        let err = sample_schema()
            .validate(&json!({ "name": "x", "score": 11, "weight": 1, "notes": [] }))
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_number_as_string() {
        let value = json!({ "name": "x", "score": "3", "weight": 1, "notes": [] });
        assert!(sample_schema().validate(&value).is_err());
    }

    #[test]
    fn rejects_non_string_list_items() {
        let value = json!({ "name": "x", "score": 3, "weight": 1, "notes": ["ok", 4] });
        assert!(sample_schema().validate(&value).is_err());
    }

    #[test]
    fn json_schema_lists_every_field_as_required() {
        let schema = sample_schema().to_json_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["name"]["type"], "STRING");
        assert_eq!(schema["properties"]["score"]["type"], "NUMBER");
        assert_eq!(schema["properties"]["notes"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["notes"]["items"]["type"], "STRING");
        assert_eq!(schema["required"], json!(["name", "score", "weight", "notes"]));
    }

    #[test]
    fn pest_diagnosis_parses() {
        let diagnosis: PestDiagnosis = parse_response(json!({
            "diagnosis": "Pink bollworm",
            "treatment": "Pheromone traps and recommended insecticide",
            "prevention": ["Destroy crop residue", "Timely sowing"]
        }))
        .unwrap();
        assert_eq!(diagnosis.diagnosis, "Pink bollworm");
        assert_eq!(diagnosis.prevention.len(), 2);
    }

    #[test]
    fn yield_confidence_must_be_a_percentage() {
        let result = parse_response::<YieldPrediction>(json!({
            "predicted_yield": 60,
            "unit": "quintals",
            "confidence": 140,
            "positive_factors": [],
            "negative_factors": [],
            "recommendations": []
        }));
        assert!(matches!(result, Err(CoreError::SchemaMismatch(_))));
    }

    #[test]
    fn irrigation_water_cannot_be_negative() {
        let result = parse_response::<IrrigationPlan>(json!({
            "method": "Flood",
            "frequency": "Weekly",
            "water_per_session_liters": -10,
            "schedule": [],
            "tips": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn every_response_declares_its_fields() {
        assert_eq!(PestDiagnosis::schema().fields.len(), 3);
        assert_eq!(YieldPrediction::schema().fields.len(), 6);
        assert_eq!(IrrigationPlan::schema().fields.len(), 5);
        assert_eq!(CropRecommendation::schema().fields.len(), 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Prompts
// ═══════════════════════════════════════════════════════════════════

mod prompt_templates {
    use super::*;

    #[test]
    fn pest_prompt_carries_form_values_and_language() {
        let prompt = prompts::pest_diagnosis(&pest_request(), Language::Hi);
        assert!(prompt.contains("- Crop: Cotton"));
        assert!(prompt.contains("- Affected part: Boll"));
        assert!(prompt.contains("- Location: Vidarbha"));
        assert!(prompt.contains("in Hindi"));
    }

    #[test]
    fn blank_optional_fields_are_left_out() {
        let mut request = pest_request();
        request.affected_part = Some("   ".into());
        request.location = None;
        let prompt = prompts::pest_diagnosis(&request, Language::En);
        assert!(!prompt.contains("Affected part"));
        assert!(!prompt.contains("Location"));
        assert!(prompt.contains("in English"));
    }

    #[test]
    fn yield_prompt_includes_numbers() {
        let prompt = prompts::yield_prediction(&yield_request(), Language::En);
        assert!(prompt.contains("- Area: 3 acres"));
        assert!(prompt.contains("- Expected rainfall: 1100 mm"));
        assert!(prompt.contains("- Fertilizer: Urea + DAP"));
        assert!(!prompt.contains("Irrigation:"));
    }

    #[test]
    fn crop_prompt_includes_region() {
        let request = CropRecommendationRequest {
            soil_type: "Black cotton".into(),
            soil_ph: 7.5,
            rainfall_mm: 800.0,
            temperature_c: 27.0,
            season: "Rabi".into(),
            region: "Malwa".into(),
        };
        let prompt = prompts::crop_recommendation(&request, Language::En);
        assert!(prompt.contains("- Region: Malwa"));
        assert!(prompt.contains("- Soil pH: 7.5"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// GeminiAdvisor (mock HTTP server)
// ═══════════════════════════════════════════════════════════════════

mod gemini {
    use super::*;

    #[tokio::test]
    async fn diagnose_pest_parses_json_mode_output() {
        let server = MockServer::start().await;
        let model_output = json!({
            "diagnosis": "Pink bollworm",
            "treatment": "Install pheromone traps",
            "prevention": ["Deep ploughing after harvest"]
        })
        .to_string();

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&model_output)))
            .expect(1)
            .mount(&server)
            .await;

        let advisor = GeminiAdvisor::new(&settings_for(&server));
        let diagnosis = advisor.diagnose_pest(&pest_request(), Language::En).await.unwrap();
        assert_eq!(diagnosis.diagnosis, "Pink bollworm");
        assert_eq!(diagnosis.prevention, vec!["Deep ploughing after harvest".to_string()]);
    }

    #[tokio::test]
    async fn fenced_output_is_accepted() {
        let server = MockServer::start().await;
        let fenced = "```json\n{\"crops\":[\"Gram\"],\"rationale\":\"Residual moisture\",\"tips\":[]}\n```";
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(fenced)))
            .mount(&server)
            .await;

        let request = CropRecommendationRequest {
            soil_type: "Loam".into(),
            soil_ph: 6.8,
            rainfall_mm: 600.0,
            temperature_c: 20.0,
            season: "Rabi".into(),
            region: "Bundelkhand".into(),
        };
        let rec = GeminiAdvisor::new(&settings_for(&server))
            .recommend_crops(&request, Language::En)
            .await
            .unwrap();
        assert_eq!(rec.crops, vec!["Gram".to_string()]);
    }

    #[tokio::test]
    async fn http_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let err = GeminiAdvisor::new(&settings_for(&server))
            .diagnose_pest(&pest_request(), Language::En)
            .await
            .unwrap_err();
        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "Gemini");
                assert!(message.starts_with("HTTP 500"));
            }
            other => panic!("Expected Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_text_is_schema_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope("Sorry, I cannot help with that.")),
            )
            .mount(&server)
            .await;

        let err = GeminiAdvisor::new(&settings_for(&server))
            .diagnose_pest(&pest_request(), Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn wrong_shape_is_schema_mismatch() {
        let server = MockServer::start().await;
        let model_output = json!({ "predicted_yield": 54, "unit": "quintals" }).to_string();
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&model_output)))
            .mount(&server)
            .await;

        let err = GeminiAdvisor::new(&settings_for(&server))
            .predict_yield(&yield_request(), Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn empty_candidates_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = GeminiAdvisor::new(&settings_for(&server))
            .diagnose_pest(&pest_request(), Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut settings = settings_for(&server);
        settings.api_key = None;
        let err = GeminiAdvisor::new(&settings)
            .diagnose_pest(&pest_request(), Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn name() {
        let advisor = GeminiAdvisor::new(&AdvisorSettings::default());
        assert_eq!(advisor.name(), "Gemini");
    }

    #[tokio::test]
    async fn malformed_output_reaches_caller_as_analysis_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope("{\"diagnosis\": ")))
            .expect(1)
            .mount(&server)
            .await;

        let service = AdvisoryService::new(Box::new(GeminiAdvisor::new(&settings_for(&server))));
        let err = service.diagnose_pest(&pest_request(), Language::En).await.unwrap_err();
        assert!(matches!(err, CoreError::AnalysisFailed));
    }

    #[tokio::test]
    async fn missing_key_reaches_caller_as_analysis_failed() {
        let service = AdvisoryService::new(Box::new(GeminiAdvisor::new(&AdvisorSettings::default())));
        let err = service.diagnose_pest(&pest_request(), Language::En).await.unwrap_err();
        assert!(matches!(err, CoreError::AnalysisFailed));
    }
}
