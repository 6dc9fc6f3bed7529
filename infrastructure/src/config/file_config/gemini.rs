//! Model service configuration from TOML (`[gemini]` section)

use interrogation_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Model identifier used for every call.
    pub model: String,
    /// Base URL of the Generative Language REST API.
    pub base_url: String,
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub case_temperature: f32,
    pub complaint_temperature: f32,
    pub turn_temperature: f32,
    pub summary_temperature: f32,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-preview-04-17".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            timeout_secs: 120,
            case_temperature: 0.5,
            complaint_temperature: 0.8,
            turn_temperature: 0.75,
            summary_temperature: 0.3,
        }
    }
}

impl FileGeminiConfig {
    /// API key from the config file, falling back to the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error("gemini.model", "model name cannot be empty"));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "gemini.timeout_secs",
                "timeout_secs cannot be 0",
            ));
        }

        for (field, value) in [
            ("gemini.case_temperature", self.case_temperature),
            ("gemini.complaint_temperature", self.complaint_temperature),
            ("gemini.turn_temperature", self.turn_temperature),
            ("gemini.summary_temperature", self.summary_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                issues.push(ConfigIssue::error(
                    field,
                    format!("temperature {} is outside 0.0..=2.0", value),
                ));
            }
        }

        issues
    }
}
