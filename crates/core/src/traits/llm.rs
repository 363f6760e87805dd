//! Language Model traits

use async_trait::async_trait;

use crate::{GenerateRequest, GenerateResponse, Result};

/// Language Model interface
///
/// Implementations:
/// - `LanguageModelAdapter` over `OllamaBackend` - Local Ollama inference
/// - `LanguageModelAdapter` over `OpenAIBackend` - OpenAI-compatible APIs
///
/// The SMS extractor only ever issues a single non-streaming request and may
/// abandon it mid-flight, so implementations must not rely on being polled to
/// completion.
///
/// # Example
///
/// ```ignore
/// let llm: Arc<dyn LanguageModel> = Arc::new(LanguageModelAdapter::new(backend));
/// let request = GenerateRequest::new("Extract the caller's name")
///     .with_user_message("hi this is Ana");
/// let response = llm.generate(request).await?;
/// println!("{}", response.text);
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate completion
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Check if model is available
    async fn is_available(&self) -> bool;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}
