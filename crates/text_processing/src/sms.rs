//! Hybrid SMS field extraction
//!
//! An SMS has no speaker turns, so the LLM gets the first shot at the body.
//! The LLM call is raced against a deadline; when the deadline wins, the
//! in-flight call is left to finish on its own and its result is ignored.
//! Whatever the LLM did not supply comes from the regex cascades.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use intake_config::SmsSettings;
use intake_core::{
    FieldKind, FieldSource, GenerateRequest, LanguageModel, Pass, SmsExtractionResult,
    ValidatedField,
};

use crate::address::extract_validated_address;
use crate::language::detect_language_text;
use crate::name::extract_validated_name;
use crate::normalizer::normalize;
use crate::numbers::normalize_leading_number;
use crate::validator;

const LLM_CONFIDENCE: f32 = 0.8;
const MAX_REPLY_TOKENS: u32 = 128;

const SYSTEM_PROMPT: &str = r#"You extract contact details from text messages sent to a city services line. Messages may be in English or Spanish.

RULES:
1. Extract the sender's name only if they state it explicitly.
2. Extract the street address only if one is stated explicitly. Keep house numbers as written.
3. Never guess. Use null for anything not stated.
4. Respond with a single JSON object and nothing else: {"name": string or null, "address": string or null}"#;

/// Fields as the LLM returned them, before validation
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct LlmFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl LlmFields {
    fn cleaned(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("null"))
    }
}

/// Parse an LLM reply, tolerating code fences and surrounding prose
pub fn parse_llm_fields(reply: &str) -> Option<LlmFields> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    let fields: LlmFields = serde_json::from_str(&reply[start..=end]).ok()?;
    Some(LlmFields {
        name: LlmFields::cleaned(fields.name),
        address: LlmFields::cleaned(fields.address),
    })
}

/// LLM-first, regex-fallback extractor for SMS bodies
#[derive(Clone)]
pub struct SmsFieldExtractor {
    llm: Option<Arc<dyn LanguageModel>>,
    deadline: Duration,
}

impl std::fmt::Debug for SmsFieldExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsFieldExtractor")
            .field("llm", &self.llm.as_ref().map(|llm| llm.model_name().to_string()))
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl SmsFieldExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>, deadline: Duration) -> Self {
        Self {
            llm: Some(llm),
            deadline,
        }
    }

    /// Extractor that never calls an LLM
    pub fn regex_only() -> Self {
        Self {
            llm: None,
            deadline: SmsSettings::default().llm_deadline(),
        }
    }

    /// Build from settings; the LLM is dropped when disabled there
    pub fn from_settings(settings: &SmsSettings, llm: Option<Arc<dyn LanguageModel>>) -> Self {
        Self {
            llm: llm.filter(|_| settings.llm_enabled),
            deadline: settings.llm_deadline(),
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Extract name, address and language from an SMS body
    pub async fn extract(&self, body: &str) -> SmsExtractionResult {
        let llm_fields = match &self.llm {
            Some(llm) => self.race_llm(llm.clone(), body).await.unwrap_or_default(),
            None => LlmFields::default(),
        };

        let normalized = normalize(body);

        let name = llm_field(FieldKind::Name, llm_fields.name)
            .or_else(|| extract_validated_name(&normalized, Pass::Body))
            .unwrap_or_else(|| ValidatedField::default_for(FieldKind::Name));

        let address = llm_field(FieldKind::Address, llm_fields.address)
            .or_else(|| extract_validated_address(&normalized, Pass::Body))
            .unwrap_or_else(|| ValidatedField::default_for(FieldKind::Address));

        let result = SmsExtractionResult::from_fields(name, address, detect_language_text(body));
        tracing::debug!(
            name_source = ?result.name_source,
            address_source = ?result.address_source,
            completeness = ?result.completeness,
            "SMS extraction finished"
        );
        result
    }

    /// Race the LLM call against the deadline. `None` on failure or timeout.
    async fn race_llm(&self, llm: Arc<dyn LanguageModel>, body: &str) -> Option<LlmFields> {
        let request = GenerateRequest::new(SYSTEM_PROMPT)
            .with_user_message(body)
            .with_max_tokens(MAX_REPLY_TOKENS)
            .with_temperature(0.0)
            .with_json_mode();

        let mut task = tokio::spawn(async move { llm.generate(request).await });

        // The task is not aborted on timeout; it finishes detached
        tokio::select! {
            joined = &mut task => match joined {
                Ok(Ok(response)) => {
                    let fields = parse_llm_fields(&response.text);
                    if fields.is_none() {
                        tracing::warn!(reply = %response.text, "LLM reply was not a JSON object, using regex");
                    }
                    fields
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "LLM extraction failed, using regex");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "LLM extraction task panicked, using regex");
                    None
                }
            },
            _ = tokio::time::sleep(self.deadline) => {
                tracing::warn!(
                    deadline_ms = self.deadline.as_millis() as u64,
                    "LLM extraction missed the deadline, using regex"
                );
                None
            }
        }
    }
}

/// Validate an LLM-supplied value; addresses get their number words decoded
fn llm_field(kind: FieldKind, value: Option<String>) -> Option<ValidatedField> {
    let value = value?;
    let value = match kind {
        FieldKind::Name => value,
        FieldKind::Address => normalize_leading_number(&value),
    };
    let value = validator::validate(kind, &value)?;
    Some(ValidatedField::new(value, FieldSource::Llm, LLM_CONFIDENCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{Completeness, SmsFieldSource};

    #[test]
    fn test_parse_plain_json() {
        let fields = parse_llm_fields(r#"{"name": "Ana Ruiz", "address": null}"#).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Ana Ruiz"));
        assert_eq!(fields.address, None);
    }

    #[test]
    fn test_parse_fenced_json_with_prose() {
        let reply = "Sure! Here you go:\n```json\n{\"name\": \"\", \"address\": \"45 Pine St\"}\n```";
        let fields = parse_llm_fields(reply).unwrap();
        assert_eq!(fields.name, None);
        assert_eq!(fields.address.as_deref(), Some("45 Pine St"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_llm_fields("I could not find anything").is_none());
        assert!(parse_llm_fields("} nope {").is_none());
        assert!(parse_llm_fields("{not json}").is_none());
    }

    #[test]
    fn test_null_literal_is_none() {
        let fields = parse_llm_fields(r#"{"name": "null", "address": "  "}"#).unwrap();
        assert_eq!(fields, LlmFields::default());
    }

    #[test]
    fn test_llm_address_is_decoded_and_validated() {
        let field = llm_field(FieldKind::Address, Some("eleven twenty two Main Street".into())).unwrap();
        assert_eq!(field.value, "1122 Main Street");
        assert_eq!(field.source, FieldSource::Llm);

        assert!(llm_field(FieldKind::Address, Some("somewhere near the park".into())).is_none());
        assert!(llm_field(FieldKind::Name, Some("calling about the water".into())).is_none());
    }

    #[tokio::test]
    async fn test_regex_only() {
        let extractor = SmsFieldExtractor::regex_only();
        assert!(!extractor.has_llm());

        let result = extractor.extract("123 Oak Ave, my name is Maria Lopez").await;
        assert_eq!(result.name.value, "Maria Lopez");
        assert_eq!(result.address.value, "123 Oak Ave");
        assert_eq!(result.name_source, SmsFieldSource::Regex);
        assert_eq!(result.address_source, SmsFieldSource::Regex);
        assert_eq!(result.completeness, Completeness::Complete);
        assert!(result.address_is_complete);
    }

    #[tokio::test]
    async fn test_nothing_found_is_minimal() {
        let result = SmsFieldExtractor::regex_only()
            .extract("hay mucho ruido otra vez")
            .await;
        assert!(result.name.is_default());
        assert!(result.address.is_default());
        assert_eq!(result.completeness, Completeness::Minimal);
        assert_eq!(result.language, intake_core::Language::Spanish);
    }
}
