//! Extraction result types
//!
//! Every field the engine emits carries its value and a provenance tag. When
//! no candidate survives validation the field holds a fixed default literal
//! tagged `default`, so results are always complete.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Language;

/// Fallback name when nothing survives validation
pub const DEFAULT_NAME: &str = "Unknown Caller";

/// Fallback address when nothing survives validation
pub const DEFAULT_ADDRESS: &str = "Not provided";

/// Which intake field is being extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Address,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
        }
    }

    /// The literal used when extraction is inconclusive
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::Name => DEFAULT_NAME,
            Self::Address => DEFAULT_ADDRESS,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sweep of a cascade over a particular view of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    /// Structured per-speaker caller utterances
    Messages,
    /// The flattened call transcript
    Transcript,
    /// A raw SMS body (single pass)
    Body,
}

impl Pass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Transcript => "transcript",
            Self::Body => "body",
        }
    }

    /// Confidence multiplier: per-speaker text is cleaner than the blob
    pub fn confidence_factor(&self) -> f32 {
        match self {
            Self::Messages | Self::Body => 1.0,
            Self::Transcript => 0.9,
        }
    }
}

impl FromStr for Pass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "messages" => Ok(Self::Messages),
            "transcript" => Ok(Self::Transcript),
            "body" => Ok(Self::Body),
            other => Err(format!("unknown pass: {}", other)),
        }
    }
}

/// A proposal from a cascade pattern, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionCandidate {
    pub value: String,
    pub pattern: &'static str,
    pub pass: Pass,
}

/// Where a field value came from
///
/// Serialized as a compact tag: `messages/my_name_is`, `llm`, `default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    Pattern { pass: Pass, pattern: String },
    Llm,
    Default,
}

impl FieldSource {
    pub fn pattern(pass: Pass, pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pass,
            pattern: pattern.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern { pass, pattern } => write!(f, "{}/{}", pass.as_str(), pattern),
            Self::Llm => f.write_str("llm"),
            Self::Default => f.write_str("default"),
        }
    }
}

impl FromStr for FieldSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "llm" => Ok(Self::Llm),
            "default" => Ok(Self::Default),
            tagged => {
                let (pass, pattern) = tagged
                    .split_once('/')
                    .ok_or_else(|| format!("malformed field source: {}", tagged))?;
                Ok(Self::Pattern {
                    pass: pass.parse()?,
                    pattern: pattern.to_string(),
                })
            },
        }
    }
}

impl Serialize for FieldSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Terminal, externally visible extraction output for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedField {
    pub value: String,
    pub source: FieldSource,
    /// 0.0 for defaults
    pub confidence: f32,
}

impl ValidatedField {
    pub fn new(value: impl Into<String>, source: FieldSource, confidence: f32) -> Self {
        Self {
            value: value.into(),
            source,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The fixed fallback for a field kind
    pub fn default_for(kind: FieldKind) -> Self {
        Self {
            value: kind.default_value().to_string(),
            source: FieldSource::Default,
            confidence: 0.0,
        }
    }

    pub fn is_default(&self) -> bool {
        self.source.is_default()
    }
}

/// Voice-path engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub name: ValidatedField,
    pub address: ValidatedField,
    pub language: Language,
}

impl ExtractionResult {
    /// True when a record built from this result should be flagged for manual review
    pub fn needs_review(&self) -> bool {
        self.name.is_default() || self.address.is_default()
    }

    pub fn address_is_complete(&self) -> bool {
        !self.address.is_default() && starts_with_digit_run(&self.address.value)
    }
}

/// Coarse provenance used on the SMS path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsFieldSource {
    Llm,
    Regex,
    Default,
}

impl From<&FieldSource> for SmsFieldSource {
    fn from(source: &FieldSource) -> Self {
        match source {
            FieldSource::Llm => Self::Llm,
            FieldSource::Pattern { .. } => Self::Regex,
            FieldSource::Default => Self::Default,
        }
    }
}

/// How much structured data an SMS yielded. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    Complete,
    Partial,
    Minimal,
}

impl Completeness {
    /// Grade a name/address pair
    pub fn grade(name: &ValidatedField, address: &ValidatedField) -> Self {
        let address_complete = !address.is_default() && starts_with_digit_run(&address.value);
        match (name.is_default(), address.is_default()) {
            (true, true) => Self::Minimal,
            (false, false) if address_complete => Self::Complete,
            _ => Self::Partial,
        }
    }
}

/// SMS-path engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsExtractionResult {
    pub name: ValidatedField,
    pub address: ValidatedField,
    pub language: Language,
    pub name_source: SmsFieldSource,
    pub address_source: SmsFieldSource,
    pub completeness: Completeness,
    pub address_is_complete: bool,
}

impl SmsExtractionResult {
    /// Assemble the result, deriving sources and grades from the fields
    pub fn from_fields(name: ValidatedField, address: ValidatedField, language: Language) -> Self {
        let completeness = Completeness::grade(&name, &address);
        let address_is_complete = !address.is_default() && starts_with_digit_run(&address.value);
        Self {
            name_source: SmsFieldSource::from(&name.source),
            address_source: SmsFieldSource::from(&address.source),
            completeness,
            address_is_complete,
            name,
            address,
            language,
        }
    }

    pub fn needs_review(&self) -> bool {
        self.name.is_default() || self.address.is_default()
    }
}

/// An address is complete when it begins with a house number
pub fn starts_with_digit_run(value: &str) -> bool {
    value
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}
