//! Conversation input types
//!
//! Utterances come from the call-analytics webhook payload and are consumed
//! read-only by the extraction engine.

use serde::{Deserialize, Serialize};

/// Who spoke an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    /// The citizen making the report
    #[serde(alias = "user", alias = "customer")]
    Caller,
    /// The answering agent (human or bot)
    #[serde(alias = "assistant", alias = "bot")]
    Agent,
    /// Platform-injected text
    System,
}

/// One speaker turn from a call transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub role: SpeakerRole,
    #[serde(alias = "content")]
    pub text: String,
    /// Offset in seconds from call start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

impl Utterance {
    /// Create a caller utterance
    pub fn caller(text: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Caller,
            text: text.into(),
            time: None,
        }
    }

    /// Create an agent utterance
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Agent,
            text: text.into(),
            time: None,
        }
    }

    /// Attach a timestamp
    pub fn at(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn is_caller(&self) -> bool {
        self.role == SpeakerRole::Caller
    }
}

/// Join the caller's utterances into one raw string, in order.
///
/// The result is not normalized: language detection and downstream
/// classification work on raw text.
pub fn flatten_caller_text(utterances: &[Utterance]) -> String {
    utterances
        .iter()
        .filter(|u| u.is_caller())
        .map(|u| u.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_aliases() {
        let json = r#"[
            {"role": "user", "text": "hello"},
            {"role": "agent", "content": "hi there", "time": 1.5},
            {"role": "customer", "text": "my name is Ana"}
        ]"#;
        let utterances: Vec<Utterance> = serde_json::from_str(json).unwrap();
        assert_eq!(utterances[0].role, SpeakerRole::Caller);
        assert_eq!(utterances[1].role, SpeakerRole::Agent);
        assert_eq!(utterances[1].time, Some(1.5));
        assert_eq!(utterances[2].role, SpeakerRole::Caller);
    }

    #[test]
    fn test_flatten_caller_text() {
        let utterances = vec![
            Utterance::agent("How can I help?"),
            Utterance::caller("  hola  "),
            Utterance::caller(""),
            Utterance::caller("tengo un problema"),
        ];
        assert_eq!(flatten_caller_text(&utterances), "hola tengo un problema");
    }
}
