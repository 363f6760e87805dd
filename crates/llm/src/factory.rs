//! LLM Factory
//!
//! Builds a `LanguageModel` from `LlmSettings`. A disabled provider yields
//! `None`, which puts SMS extraction in regex-only mode.

use std::sync::Arc;

use intake_config::{LlmProviderKind, LlmSettings};
use intake_core::LanguageModel;

use crate::{
    adapter::LanguageModelAdapter,
    backend::{LlmBackend, LlmConfig, OllamaBackend, OpenAIBackend, OpenAIConfig},
    LlmError,
};

/// Factory for creating LLM backends
pub struct LlmFactory;

impl LlmFactory {
    /// Create a LanguageModel from settings (implements core trait)
    pub fn create(
        settings: &LlmSettings,
    ) -> Result<Option<Arc<dyn LanguageModel>>, LlmError> {
        let backend = match Self::create_backend(settings)? {
            Some(backend) => backend,
            None => {
                tracing::info!("LLM provider disabled, SMS extraction is regex-only");
                return Ok(None);
            }
        };

        tracing::info!(
            provider = ?settings.provider,
            model = %backend.model_name(),
            "Created LLM backend"
        );

        Ok(Some(Arc::new(LanguageModelAdapter::from_arc(backend))))
    }

    /// Create a raw LlmBackend (for low-level access)
    pub fn create_backend(
        settings: &LlmSettings,
    ) -> Result<Option<Arc<dyn LlmBackend>>, LlmError> {
        match settings.provider {
            LlmProviderKind::Disabled => Ok(None),

            LlmProviderKind::Ollama => {
                let config = LlmConfig {
                    model: settings.model.clone(),
                    endpoint: settings.endpoint.clone(),
                    max_tokens: settings.max_tokens,
                    temperature: settings.temperature,
                    timeout: settings.timeout(),
                    ..Default::default()
                };

                Ok(Some(Arc::new(OllamaBackend::new(config)?)))
            }

            LlmProviderKind::OpenAI => {
                let config = OpenAIConfig {
                    endpoint: settings.endpoint.clone(),
                    api_key: settings.resolved_api_key().unwrap_or_default(),
                    model: settings.model.clone(),
                    max_tokens: settings.max_tokens,
                    temperature: settings.temperature,
                    timeout: settings.timeout(),
                };

                Ok(Some(Arc::new(OpenAIBackend::new(config)?)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_provider_yields_none() {
        let settings = LlmSettings {
            provider: LlmProviderKind::Disabled,
            ..Default::default()
        };
        assert!(LlmFactory::create(&settings).unwrap().is_none());
    }

    #[test]
    fn test_ollama_from_defaults() {
        let llm = LlmFactory::create(&LlmSettings::default())
            .unwrap()
            .expect("ollama backend");
        assert_eq!(llm.model_name(), "qwen2.5:3b-instruct");
    }

    #[test]
    fn test_openai_local_endpoint() {
        let settings = LlmSettings {
            provider: LlmProviderKind::OpenAI,
            endpoint: "http://localhost:8080/v1".to_string(),
            model: "llama-3.2-3b".to_string(),
            ..Default::default()
        };
        let llm = LlmFactory::create(&settings).unwrap().expect("openai backend");
        assert_eq!(llm.model_name(), "llama-3.2-3b");
    }

    #[test]
    fn test_openai_remote_requires_key() {
        let settings = LlmSettings {
            provider: LlmProviderKind::OpenAI,
            endpoint: "https://llm.example.com/v1".to_string(),
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            LlmFactory::create(&settings),
            Err(LlmError::Configuration(_))
        ));
    }
}
