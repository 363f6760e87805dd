//! Post-extraction validation
//!
//! Vetoes candidates that a cascade matched but that cannot be a name or an
//! address ("calling about the water", "somewhere near the park"). The
//! validator never fails: a rejected candidate is logged and the caller moves
//! on to the next one.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use intake_core::FieldKind;

use crate::lexicon::{is_allowed_given_name, is_name_stop_word};

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 50;
const MIN_ADDRESS_CHARS: usize = 5;

// Candidates that start like a verb phrase rather than a name
static VERB_PHRASE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:calling|reporting|having|looking|trying|going|gonna|getting|wondering|writing|texting|living|just|not|still|also|here|about|llamando|reportando|teniendo|buscando|escribiendo|hablando|tengo|quiero|necesito|estoy|vivo|hay|es|son)\b",
    )
    .unwrap()
});

// Phrases cascades sometimes capture that are obviously not a person
static NON_NAME_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:the|a|an|el|la|los|las|un|una)\s|\b(?:problem|issue|pothole|street|road|avenue|water|light|trash|garbage|noise|leak|calle|avenida|agua|luz\s+de|basura|ruido|fuga|bache|problema)\b|^(?:hi|hello|hey|thanks|thank\s+you|yes|no|okay|ok|hola|gracias|buenos\s+d[ií]as|buenas\s+tardes|buenas\s+noches|s[ií])\b",
    )
    .unwrap()
});

// Non-committal address answers
static VAGUE_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:not\s+sure|don'?t\s+know|do\s+not\s+know|somewhere|near\s+the|next\s+to|close\s+to|around\s+the|across\s+from|no\s+s[eé]|cerca\s+de|al\s+lado|por\s+ah[ií]|en\s+alg[uú]n|no\s+me\s+acuerdo)\b",
    )
    .unwrap()
});

static ALL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s\-]+$").unwrap());

/// Why a candidate was vetoed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("too short")]
    TooShort,
    #[error("too long")]
    TooLong,
    #[error("all digits")]
    AllDigits,
    #[error("starts with a verb phrase")]
    VerbPhrase,
    #[error("known non-name phrase")]
    NonNamePhrase,
    #[error("common word")]
    CommonWord,
    #[error("vague location")]
    Vague,
}

/// Validate a candidate, returning the trimmed value or the rejection reason
pub fn check(kind: FieldKind, candidate: &str) -> Result<String, Rejection> {
    let value = candidate.trim();
    match kind {
        FieldKind::Name => check_name(value)?,
        FieldKind::Address => check_address(value)?,
    }
    Ok(value.to_string())
}

/// Validate a candidate; rejections are logged and yield `None`
pub fn validate(kind: FieldKind, candidate: &str) -> Option<String> {
    match check(kind, candidate) {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::debug!(
                kind = %kind,
                candidate = %candidate,
                %reason,
                "Rejected extraction candidate"
            );
            None
        }
    }
}

fn check_name(value: &str) -> Result<(), Rejection> {
    let chars = value.chars().count();
    if chars < MIN_NAME_CHARS {
        return Err(Rejection::TooShort);
    }
    if chars > MAX_NAME_CHARS {
        return Err(Rejection::TooLong);
    }
    if ALL_DIGITS.is_match(value) {
        return Err(Rejection::AllDigits);
    }
    if VERB_PHRASE_PREFIX.is_match(value) {
        return Err(Rejection::VerbPhrase);
    }

    let words: Vec<&str> = value.split_whitespace().collect();

    // Allow-listed given names are checked before the phrase and common-word rules
    if words.len() == 1 && is_allowed_given_name(words[0]) {
        return Ok(());
    }

    if NON_NAME_PHRASE.is_match(value) {
        return Err(Rejection::NonNamePhrase);
    }

    match words.as_slice() {
        [single] if is_name_stop_word(single) => Err(Rejection::CommonWord),
        many if many.len() > 1
            && many
                .iter()
                .all(|w| is_name_stop_word(w) && !is_allowed_given_name(w)) =>
        {
            Err(Rejection::CommonWord)
        }
        _ => Ok(()),
    }
}

fn check_address(value: &str) -> Result<(), Rejection> {
    if value.chars().count() < MIN_ADDRESS_CHARS {
        return Err(Rejection::TooShort);
    }
    if VAGUE_ADDRESS.is_match(value) {
        return Err(Rejection::Vague);
    }
    Ok(())
}
