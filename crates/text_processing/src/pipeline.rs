//! Extraction entry points for the voice and SMS paths

use std::sync::Arc;

use intake_config::{ConfigError, Settings};
use intake_core::{ExtractionResult, FieldKind, LanguageModel, SmsExtractionResult, Utterance};

use crate::extractor::extract_field;
use crate::language::detect_language;
use crate::sms::SmsFieldExtractor;

/// Voice-call extraction. Pure and synchronous.
///
/// Name and address come from the two-pass search; language comes from the
/// raw caller utterances.
pub fn extract_call_fields(utterances: &[Utterance], transcript: &str) -> ExtractionResult {
    let result = ExtractionResult {
        name: extract_field(FieldKind::Name, utterances, transcript),
        address: extract_field(FieldKind::Address, utterances, transcript),
        language: detect_language(utterances),
    };
    tracing::debug!(
        name_source = %result.name.source,
        address_source = %result.address.source,
        language = %result.language,
        "Call extraction finished"
    );
    result
}

/// Both extraction paths behind one handle
///
/// Cheap to clone and safe to share between request handlers; holds no
/// per-call state.
#[derive(Debug, Clone)]
pub struct IntakeExtractor {
    sms: SmsFieldExtractor,
}

impl IntakeExtractor {
    /// Create from validated settings and an optional LLM for the SMS path
    pub fn from_settings(
        settings: &Settings,
        llm: Option<Arc<dyn LanguageModel>>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let sms = SmsFieldExtractor::from_settings(&settings.sms, llm);
        tracing::info!(
            sms_llm = sms.has_llm(),
            deadline_ms = sms.deadline().as_millis() as u64,
            "Intake extractor ready"
        );
        Ok(Self { sms })
    }

    /// Extractor with no LLM: the SMS path runs the regex cascades only
    pub fn regex_only() -> Self {
        Self {
            sms: SmsFieldExtractor::regex_only(),
        }
    }

    pub fn extract_call(&self, utterances: &[Utterance], transcript: &str) -> ExtractionResult {
        extract_call_fields(utterances, transcript)
    }

    pub async fn extract_sms(&self, body: &str) -> SmsExtractionResult {
        self.sms.extract(body).await
    }
}

impl Default for IntakeExtractor {
    fn default() -> Self {
        Self::regex_only()
    }
}
