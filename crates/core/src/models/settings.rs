use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::navigation::Language;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const ENV_API_KEY: &str = "FARM_ADVISOR_API_KEY";
const ENV_MODEL: &str = "FARM_ADVISOR_MODEL";
const ENV_BASE_URL: &str = "FARM_ADVISOR_BASE_URL";

/// Connection details for the hosted language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    /// API root, without a trailing slash
    pub base_url: String,

    /// Model name (e.g., "gemini-1.5-flash")
    pub model: String,

    /// API key. Advisory calls fail until one is set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds. `None` waits for the provider indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

/// Application configuration handed to the core by the embedding app.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub advisor: AdvisorSettings,

    /// Language used until the user picks one in the sidebar settings.
    #[serde(default)]
    pub default_language: Language,
}

impl Settings {
    /// Parse settings from a JSON document. Missing sections fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Configuration(format!("Invalid settings JSON: {e}")))
    }

    /// Apply `FARM_ADVISOR_*` environment variables on top of these settings.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup (the environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.advisor.api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.advisor.model = model;
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.advisor.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}
