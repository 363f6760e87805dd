//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{llm, sms};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// LLM collaborator used by the SMS path
    #[serde(default)]
    pub llm: LlmSettings,

    /// SMS hybrid extraction
    #[serde(default)]
    pub sms: SmsSettings,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Which LLM transport to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// Local Ollama server
    #[default]
    Ollama,
    /// Any OpenAI-compatible chat completions endpoint
    #[serde(alias = "open_ai", alias = "openai-compatible")]
    OpenAI,
    /// No LLM; SMS extraction runs regex-only
    Disabled,
}

/// LLM transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: LlmProviderKind,

    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Falls back to OPENAI_API_KEY for the OpenAI provider
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// HTTP client timeout
    #[serde(default = "default_llm_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_llm_endpoint() -> String {
    llm::DEFAULT_OLLAMA_ENDPOINT.to_string()
}

fn default_llm_model() -> String {
    llm::DEFAULT_OLLAMA_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    llm::DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    llm::DEFAULT_TEMPERATURE
}

fn default_llm_timeout_ms() -> u64 {
    llm::DEFAULT_TIMEOUT_MS
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_llm_timeout_ms(),
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// API key from settings, or from the environment for OpenAI
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| match self.provider {
            LlmProviderKind::OpenAI => std::env::var("OPENAI_API_KEY").ok(),
            _ => None,
        })
    }
}

/// SMS hybrid extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsSettings {
    /// Try the LLM before the regex cascades
    #[serde(default = "default_true")]
    pub llm_enabled: bool,

    /// Deadline the LLM call is raced against
    #[serde(default = "default_llm_deadline_ms")]
    pub llm_deadline_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_llm_deadline_ms() -> u64 {
    sms::DEFAULT_LLM_DEADLINE_MS
}

impl Default for SmsSettings {
    fn default() -> Self {
        Self {
            llm_enabled: true,
            llm_deadline_ms: default_llm_deadline_ms(),
        }
    }
}

impl SmsSettings {
    pub fn llm_deadline(&self) -> Duration {
        Duration::from_millis(self.llm_deadline_ms)
    }
}

/// Logging configuration, applied by the host process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level / env-filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_sms()?;
        self.validate_llm()?;
        Ok(())
    }

    fn validate_sms(&self) -> Result<(), ConfigError> {
        let deadline = self.sms.llm_deadline_ms;
        if deadline == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sms.llm_deadline_ms".to_string(),
                message: "Deadline must be at least 1ms".to_string(),
            });
        }

        if deadline > sms::MAX_LLM_DEADLINE_MS {
            return Err(ConfigError::InvalidValue {
                field: "sms.llm_deadline_ms".to_string(),
                message: format!(
                    "Deadline too high (maximum {}ms), got {}",
                    sms::MAX_LLM_DEADLINE_MS,
                    deadline
                ),
            });
        }

        Ok(())
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;
        if llm.provider == LlmProviderKind::Disabled {
            return Ok(());
        }

        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", llm.temperature),
            });
        }

        if llm.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.endpoint".to_string()));
        }

        if llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }

        if llm.timeout_ms < self.sms.llm_deadline_ms {
            tracing::warn!(
                timeout_ms = llm.timeout_ms,
                deadline_ms = self.sms.llm_deadline_ms,
                "llm.timeout_ms is shorter than the SMS deadline; the transport will time out first"
            );
        }

        if llm.provider == LlmProviderKind::OpenAI
            && self.environment.is_strict()
            && llm.resolved_api_key().is_none()
        {
            return Err(ConfigError::InvalidValue {
                field: "llm.api_key".to_string(),
                message: "API key must be set for the OpenAI provider outside development"
                    .to_string(),
            });
        }

        Ok(())
    }
}

/// Load settings from `config/` and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from a config directory and the environment
///
/// Sources, lowest precedence first: `{dir}/default.*`, `{dir}/{env}.*`,
/// `INTAKE__*` environment variables.
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(
        File::with_name(&dir.join("default").to_string_lossy()).required(false),
    );

    if let Some(env_name) = env {
        builder = builder
            .add_source(File::with_name(&dir.join(env_name).to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("INTAKE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::info!(
        environment = ?settings.environment,
        provider = ?settings.llm.provider,
        deadline_ms = settings.sms.llm_deadline_ms,
        "Loaded intake settings"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.sms.llm_deadline_ms, 3_000);
        assert_eq!(settings.sms.llm_deadline(), Duration::from_secs(3));
        assert!(settings.sms.llm_enabled);
        assert_eq!(settings.llm.provider, LlmProviderKind::Ollama);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_deadline_validation() {
        let mut settings = Settings::default();
        settings.sms.llm_deadline_ms = 0;
        assert!(settings.validate().is_err());

        settings.sms.llm_deadline_ms = 60_000;
        assert!(settings.validate().is_err());

        settings.sms.llm_deadline_ms = 1_500;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_temperature_validation() {
        let mut settings = Settings::default();
        settings.llm.temperature = 2.5;
        assert!(settings.validate().is_err());

        // Disabled provider skips LLM checks
        settings.llm.provider = LlmProviderKind::Disabled;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_openai_requires_key_in_production() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.llm.provider = LlmProviderKind::OpenAI;
        settings.llm.api_key = Some("sk-test".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(
            file,
            r#"
[sms]
llm_deadline_ms = 1200

[llm]
provider = "disabled"
"#
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.sms.llm_deadline_ms, 1200);
        assert_eq!(settings.llm.provider, LlmProviderKind::Disabled);
        assert_eq!(settings.llm.model, llm::DEFAULT_OLLAMA_MODEL);
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[sms]\nllm_deadline_ms = 1200\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.toml"),
            "[sms]\nllm_deadline_ms = 2500\nllm_enabled = false\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.sms.llm_deadline_ms, 2500);
        assert!(!settings.sms.llm_enabled);
    }

    #[test]
    fn test_observability_section() {
        let defaults = ObservabilityConfig::default();
        assert_eq!(defaults.log_level, "info");
        assert!(!defaults.log_json);

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[observability]\nlog_level = \"intake_text_processing=debug\"\nlog_json = true\n",
        )
        .unwrap();
        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.observability.log_level, "intake_text_processing=debug");
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[sms]\nllm_deadline_ms = 0\n").unwrap();
        assert!(load_settings_from(dir.path(), None).is_err());
    }
}
