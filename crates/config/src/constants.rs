//! Centralized defaults for the intake engine
//!
//! Single source of truth for tunable defaults. Use these instead of
//! hardcoding values at call sites.

/// SMS hybrid extraction
pub mod sms {
    /// How long the LLM may take before the regex fallback wins the race
    pub const DEFAULT_LLM_DEADLINE_MS: u64 = 3_000;

    /// Upper bound accepted by settings validation
    pub const MAX_LLM_DEADLINE_MS: u64 = 30_000;
}

/// LLM transport
pub mod llm {
    pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
    pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:3b-instruct";
    pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

    /// Field extraction replies are a tiny JSON object
    pub const DEFAULT_MAX_TOKENS: u32 = 128;

    /// Extraction must be deterministic
    pub const DEFAULT_TEMPERATURE: f32 = 0.0;

    /// Transport-level timeout; the SMS deadline is normally much shorter
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
}
