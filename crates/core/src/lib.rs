//! Core traits and types for the intake extraction engine
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation input types (utterances and speaker roles)
//! - Language definitions (English and Spanish)
//! - Extraction result types with provenance tags
//! - LLM request/response types and the `LanguageModel` trait
//! - Error types

pub mod conversation;
pub mod error;
pub mod extraction;
pub mod language;
pub mod llm_types;
pub mod traits;

pub use conversation::{flatten_caller_text, SpeakerRole, Utterance};
pub use error::{Error, Result};
pub use extraction::{
    Completeness, ExtractionCandidate, ExtractionResult, FieldKind, FieldSource, Pass,
    SmsExtractionResult, SmsFieldSource, ValidatedField, DEFAULT_ADDRESS, DEFAULT_NAME,
};
pub use language::Language;
pub use llm_types::{FinishReason, GenerateRequest, GenerateResponse, Message, Role, TokenUsage};

pub use traits::LanguageModel;
