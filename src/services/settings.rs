use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

use crate::error::AppError;
use crate::models::types::GenerationParameters;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1";
pub const DEFAULT_API_KEY_ENV: &str = "HF_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub inference: InferenceConfig,
    pub prompt: PromptConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InferenceConfig {
    pub endpoint: String,
    pub api_key_env: String,         // env var holding the bearer token
    pub api_key: Option<String>,     // wins over api_key_env when set
    pub temperature: f64,
    pub max_new_tokens: u32,
    pub return_full_text: bool,
    pub request_timeout_secs: Option<u64>, // no timeout unless set
    pub log_prompt_preview_chars: Option<usize>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        let params = GenerationParameters::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            temperature: params.temperature,
            max_new_tokens: params.max_new_tokens,
            return_full_text: params.return_full_text,
            request_timeout_secs: None,
            log_prompt_preview_chars: None,
        }
    }
}

impl InferenceConfig {
    pub fn endpoint_url(&self) -> Result<Url, AppError> {
        Url::parse(self.endpoint.trim()).map_err(|source| AppError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })
    }

    pub fn parameters(&self) -> GenerationParameters {
        GenerationParameters {
            temperature: self.temperature,
            max_new_tokens: self.max_new_tokens,
            return_full_text: self.return_full_text,
        }
    }

    /// Resolves the bearer token once: explicit `api_key` first, then the env var.
    /// A missing key is not an error here; the endpoint reports it.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PromptConfig {
    pub template: Option<String>, // Tera template, receives `entry`
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub title: String,
    pub description: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:7860".to_string(),
            title: "Mental Wellness Diary Analyzer".to_string(),
            description: "Enter your daily journal or diary entry and get an emotional analysis with motivational advice.".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<String>, // daily rolling file when set
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, AppError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let cfg: AppConfig = serde_yaml::from_str(&content).map_err(|source| AppError::ConfigParse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(cfg)
}

/// Loads the file when a path is given, otherwise falls back to built-in defaults.
pub fn load_config_or_default(path: Option<&str>) -> Result<AppConfig, AppError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(AppConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_match_hosted_model_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.inference.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.inference.api_key_env, "HF_API_KEY");
        assert_eq!(cfg.inference.parameters(), GenerationParameters::default());
        assert_eq!(cfg.inference.request_timeout_secs, None);
        assert_eq!(cfg.web.bind, "127.0.0.1:7860");
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "inference:\n  endpoint: http://localhost:9000/generate\n  max_new_tokens: 64\nlogging:\n  level: debug\n"
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.inference.endpoint, "http://localhost:9000/generate");
        assert_eq!(cfg.inference.max_new_tokens, 64);
        assert_eq!(cfg.inference.temperature, 0.7);
        assert!(!cfg.inference.return_full_text);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.prompt.template.is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }), "got {err:?}");
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "inference: [unclosed").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let cfg = InferenceConfig {
            endpoint: "not a url".to_string(),
            ..InferenceConfig::default()
        };
        assert!(matches!(
            cfg.endpoint_url(),
            Err(AppError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn explicit_api_key_wins_over_env() {
        let cfg = InferenceConfig {
            api_key: Some("from-config".to_string()),
            api_key_env: "DIARY_ANALYZER_TEST_UNSET_KEY".to_string(),
            ..InferenceConfig::default()
        };
        assert_eq!(cfg.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn unresolved_api_key_is_none() {
        let cfg = InferenceConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "DIARY_ANALYZER_TEST_UNSET_KEY".to_string(),
            ..InferenceConfig::default()
        };
        assert_eq!(cfg.resolve_api_key(), None);
    }
}
