//! Field extraction engine for civic intake reports
//!
//! Turns noisy, bilingual call transcripts and SMS bodies into a caller name,
//! a street address and a language, each tagged with where it came from:
//! - **Normalizer**: strips fillers, stutters and repeats before matching
//! - **Numbers**: decodes spoken house numbers ("eleven twenty two" -> 1122)
//! - **Cascades**: ordered name and address patterns, first validated match wins
//! - **Validator**: vetoes verb phrases, common words and vague locations
//! - **Extractor**: per-utterance pass, then transcript pass, then default
//! - **Language**: English/Spanish detection on raw caller text
//! - **SMS**: LLM extraction raced against a deadline, regex fallback
//!
//! # Example
//!
//! ```
//! use intake_core::Utterance;
//! use intake_text_processing::extract_call_fields;
//!
//! let utterances = vec![Utterance::caller("uh my name is John Smith, I live at 12 Oak Ave")];
//! let result = extract_call_fields(&utterances, "");
//! assert_eq!(result.name.value, "John Smith");
//! assert_eq!(result.address.value, "12 Oak Ave");
//! ```

pub mod address;
pub mod cascade;
pub mod extractor;
pub mod language;
pub mod lexicon;
pub mod name;
pub mod normalizer;
pub mod numbers;
pub mod sms;
pub mod validator;

mod pipeline;

pub use pipeline::{extract_call_fields, IntakeExtractor};

pub use address::{extract_address, extract_validated_address, ADDRESS_CASCADE};
pub use cascade::{Cascade, Pattern};
pub use extractor::extract_field;
pub use language::{detect_language, detect_language_text};
pub use name::{extract_name, extract_validated_name, NAME_CASCADE};
pub use normalizer::normalize;
pub use numbers::{decode as decode_number, normalize_leading_number};
pub use sms::{parse_llm_fields, LlmFields, SmsFieldExtractor};
pub use validator::{validate, Rejection};
