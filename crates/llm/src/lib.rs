//! LLM integration for the SMS extraction path
//!
//! Features:
//! - Ollama and OpenAI-compatible backends
//! - JSON-mode requests for structured field extraction
//! - One request per extraction: failures are reported, never retried
//! - Factory building a `LanguageModel` from settings

pub mod adapter;
pub mod backend;
pub mod factory;

pub use adapter::LanguageModelAdapter;
pub use backend::{
    GenerationResult, LlmBackend, LlmConfig, OllamaBackend, OpenAIBackend, OpenAIConfig,
};
pub use factory::LlmFactory;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for intake_core::Error {
    fn from(err: LlmError) -> Self {
        intake_core::Error::Llm(err.to_string())
    }
}
