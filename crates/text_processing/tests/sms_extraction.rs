//! Integration tests for the hybrid SMS path (LLM race + regex fallback)
//!
//! The LLM collaborator is stubbed; time is paused so the deadline race is
//! deterministic.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use intake_config::{Settings, SmsSettings};
use intake_core::{
    Completeness, Error, GenerateRequest, GenerateResponse, LanguageModel, SmsFieldSource,
};
use intake_text_processing::SmsFieldExtractor;
use tracing_subscriber::EnvFilter;

const DEADLINE: Duration = Duration::from_millis(3000);

/// Subscriber driven by the observability settings; `RUST_LOG` still wins
fn init_tracing() {
    let observability = Settings::default().observability;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer();
    let _ = if observability.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Replies with a fixed text after a delay
struct StubLlm {
    reply: String,
    delay: Duration,
    calls: AtomicUsize,
    finished: AtomicBool,
}

impl StubLlm {
    fn replying(reply: &str) -> Arc<Self> {
        Self::slow(reply, Duration::ZERO)
    }

    fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay,
            calls: AtomicUsize::new(0),
            finished: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl LanguageModel for StubLlm {
    async fn generate(&self, request: GenerateRequest) -> intake_core::Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(request.json_mode);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.store(true, Ordering::SeqCst);
        Ok(GenerateResponse::text(self.reply.clone()))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

/// Always fails
struct FailingLlm;

#[async_trait]
impl LanguageModel for FailingLlm {
    async fn generate(&self, _request: GenerateRequest) -> intake_core::Result<GenerateResponse> {
        Err(Error::Llm("connection refused".to_string()))
    }

    async fn is_available(&self) -> bool {
        false
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

#[tokio::test(start_paused = true)]
async fn test_deadline_falls_back_to_regex() {
    init_tracing();
    let llm = StubLlm::slow(
        r#"{"name": "Someone Else", "address": "1 Wrong Way"}"#,
        Duration::from_secs(10),
    );
    let extractor = SmsFieldExtractor::new(llm.clone(), DEADLINE);

    let result = extractor.extract("123 Oak Ave, my name is Maria Lopez").await;

    assert_eq!(result.name.value, "Maria Lopez");
    assert_eq!(result.address.value, "123 Oak Ave");
    assert_eq!(result.completeness, Completeness::Complete);
    assert_eq!(result.name_source, SmsFieldSource::Regex);
    assert_eq!(result.address_source, SmsFieldSource::Regex);
    assert!(!llm.finished.load(Ordering::SeqCst));

    // The abandoned call is detached, not cancelled
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(llm.finished.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_llm_result_within_deadline() {
    let llm = StubLlm::slow(
        r#"{"name": "Maria Lopez", "address": "one twenty three Oak Avenue"}"#,
        Duration::from_millis(500),
    );
    let extractor = SmsFieldExtractor::new(llm, DEADLINE);

    let result = extractor
        .extract("hey it's maria, pothole in front of one twenty three oak avenue")
        .await;

    assert_eq!(result.name.value, "Maria Lopez");
    assert_eq!(result.address.value, "123 Oak Avenue");
    assert_eq!(result.name_source, SmsFieldSource::Llm);
    assert_eq!(result.address_source, SmsFieldSource::Llm);
    assert!(result.address_is_complete);
    assert_eq!(result.completeness, Completeness::Complete);
}

#[tokio::test]
async fn test_partial_llm_reply_is_filled_by_regex() {
    let llm = StubLlm::replying(r#"{"name": "Ana Ruiz", "address": null}"#);
    let extractor = SmsFieldExtractor::new(llm, DEADLINE);

    let result = extractor.extract("soy Ana Ruiz, hay un bache en 45 Pine St").await;

    assert_eq!(result.name.value, "Ana Ruiz");
    assert_eq!(result.name_source, SmsFieldSource::Llm);
    assert_eq!(result.address.value, "45 Pine St");
    assert_eq!(result.address_source, SmsFieldSource::Regex);
    assert_eq!(result.language, intake_core::Language::Spanish);
}

#[tokio::test]
async fn test_fenced_reply_is_accepted() {
    let llm = StubLlm::replying(
        "```json\n{\"name\": \"Tom Baker\", \"address\": \"9 Elm Rd\"}\n```",
    );
    let extractor = SmsFieldExtractor::new(llm, DEADLINE);

    let result = extractor.extract("tom here. 9 elm rd light out").await;
    assert_eq!(result.name.value, "Tom Baker");
    assert_eq!(result.address.value, "9 Elm Rd");
    assert_eq!(result.name_source, SmsFieldSource::Llm);
}

#[tokio::test]
async fn test_malformed_reply_falls_back() {
    let llm = StubLlm::replying("Sorry, I can't help with that.");
    let extractor = SmsFieldExtractor::new(llm, DEADLINE);

    let result = extractor.extract("My name is John Smith").await;
    assert_eq!(result.name.value, "John Smith");
    assert_eq!(result.name_source, SmsFieldSource::Regex);
    assert!(result.address.is_default());
    assert_eq!(result.address_source, SmsFieldSource::Default);
    assert_eq!(result.completeness, Completeness::Partial);
}

#[tokio::test]
async fn test_rejected_llm_value_falls_back() {
    let llm = StubLlm::replying(r#"{"name": "calling about the water", "address": "near the park"}"#);
    let extractor = SmsFieldExtractor::new(llm, DEADLINE);

    let result = extractor.extract("calling about the water, this is Ana Ruiz").await;
    assert_eq!(result.name.value, "Ana Ruiz");
    assert_eq!(result.name_source, SmsFieldSource::Regex);
    assert!(result.address.is_default());
    assert_eq!(result.completeness, Completeness::Partial);
}

#[tokio::test]
async fn test_failing_llm_falls_back() {
    let extractor = SmsFieldExtractor::new(Arc::new(FailingLlm), DEADLINE);

    let result = extractor.extract("Pothole at 77 Sunset Blvd").await;
    assert!(result.name.is_default());
    assert_eq!(result.address.value, "77 Sunset Blvd");
    assert_eq!(result.completeness, Completeness::Partial);
}

#[tokio::test]
async fn test_disabled_llm_is_never_called() {
    let llm = StubLlm::replying(r#"{"name": "Maria Lopez", "address": null}"#);
    let settings = SmsSettings {
        llm_enabled: false,
        ..SmsSettings::default()
    };
    let extractor = SmsFieldExtractor::from_settings(&settings, Some(llm.clone()));

    let result = extractor.extract("no name here").await;
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    assert!(result.name.is_default());
    assert_eq!(result.completeness, Completeness::Minimal);
}

#[tokio::test]
async fn test_result_json_contract() {
    let result = SmsFieldExtractor::regex_only()
        .extract("123 Oak Ave, my name is Maria Lopez")
        .await;
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["name"]["value"], "Maria Lopez");
    assert_eq!(json["name"]["source"], "body/my_name_is");
    assert_eq!(json["nameSource"], "regex");
    assert_eq!(json["addressSource"], "regex");
    assert_eq!(json["completeness"], "complete");
    assert_eq!(json["addressIsComplete"], true);
    assert_eq!(json["language"], "English");
}
