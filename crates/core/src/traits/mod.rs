//! Core traits for pluggable collaborators

mod llm;

pub use llm::LanguageModel;
