//! Caller name cascade (English and Spanish)
//!
//! Explicit self-introductions are tried first, strongest trigger first;
//! bare capitalized names after a speaker label or at a sentence start come
//! last. Triggers are case-insensitive. Names after the weaker triggers
//! ("i'm", "soy", "this is") must be capitalized, since those triggers are
//! followed by ordinary words far more often than by names.

use once_cell::sync::Lazy;
use regex::Regex;

use intake_core::{ExtractionCandidate, FieldKind, Pass, ValidatedField};

use crate::cascade::{Cascade, Pattern};
use crate::lexicon::{is_name_shaped, strip_trailing_punct};

const MAX_NAME_WORDS: usize = 3;

static MY_NAME_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmy\s+name(?:\s+is|'s|’s)\b[:,]?").unwrap());
static MI_NOMBRE_ES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmi\s+nombre\s+es\b[:,]?").unwrap());
static ME_LLAMO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bme\s+llamo\b").unwrap());
static THIS_IS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bthis\s+is\b").unwrap());
static LE_HABLA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:le\s+)?habla\b").unwrap());
static I_AM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:i'm|i’m|i\s+am)(?:\s|$)").unwrap());
static SOY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsoy\b").unwrap());
static ITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:it's|it’s)(?:\s|$)").unwrap());
static SPEAKER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)(?:^|\s)(?:customer|caller|cliente|user|usuario)\s*:").unwrap()
});
static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?\n]+\s*").unwrap());

/// Take up to three consecutive name-shaped words from the head of `rest`.
///
/// A word carrying trailing punctuation is kept and ends the run. Returns the
/// name and whether the run ended at punctuation or end of text.
fn take_name(rest: &str, capitalized: bool) -> Option<(String, bool)> {
    let mut words: Vec<&str> = Vec::new();
    let mut tokens = rest.split_whitespace().peekable();
    let mut closed = false;

    while let Some(token) = tokens.next() {
        let (core, punctuated) = strip_trailing_punct(token);
        let core = core.trim_start_matches(|c: char| "\"“(".contains(c));
        if !is_name_shaped(core) {
            break;
        }
        if capitalized && !core.chars().next().is_some_and(char::is_uppercase) {
            break;
        }
        words.push(core);
        if punctuated || tokens.peek().is_none() {
            closed = true;
            break;
        }
        if words.len() == MAX_NAME_WORDS {
            break;
        }
    }

    if words.is_empty() {
        None
    } else {
        Some((words.join(" "), closed))
    }
}

fn after_trigger(text: &str, trigger: &Regex, capitalized: bool) -> Vec<String> {
    trigger
        .find_iter(text)
        .filter_map(|m| take_name(&text[m.end()..], capitalized).map(|(name, _)| name))
        .collect()
}

/// A bare name: capitalized, closed by punctuation or the end of the span,
/// and a single word only when it is the entire span
fn bare_name(span: &str) -> Option<String> {
    let (name, closed) = take_name(span, true)?;
    if !closed {
        return None;
    }
    let words = name.split_whitespace().count();
    let whole = span.split_whitespace().count() == words;
    if words >= 2 || whole {
        Some(name)
    } else {
        None
    }
}

fn match_my_name_is(text: &str) -> Vec<String> {
    after_trigger(text, &MY_NAME_IS, false)
}

fn match_mi_nombre_es(text: &str) -> Vec<String> {
    after_trigger(text, &MI_NOMBRE_ES, false)
}

fn match_me_llamo(text: &str) -> Vec<String> {
    after_trigger(text, &ME_LLAMO, false)
}

fn match_this_is(text: &str) -> Vec<String> {
    after_trigger(text, &THIS_IS, true)
}

fn match_le_habla(text: &str) -> Vec<String> {
    after_trigger(text, &LE_HABLA, true)
}

fn match_i_am(text: &str) -> Vec<String> {
    after_trigger(text, &I_AM, true)
}

fn match_soy(text: &str) -> Vec<String> {
    after_trigger(text, &SOY, true)
}

fn match_its(text: &str) -> Vec<String> {
    after_trigger(text, &ITS, true)
}

fn match_speaker_label(text: &str) -> Vec<String> {
    SPEAKER_LABEL
        .find_iter(text)
        .filter_map(|m| {
            let rest = &text[m.end()..];
            let line = rest.split('\n').next().unwrap_or(rest);
            let sentence = SENTENCE_SPLIT.split(line).next().unwrap_or(line);
            bare_name(sentence)
        })
        .collect()
}

fn match_sentence_start(text: &str) -> Vec<String> {
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|sentence| {
            // A leading comma-separated greeting ("Hi, Maria Lopez") is skipped
            let span = match sentence.split_once(',') {
                Some((head, tail)) if take_name(head, true).is_none() => tail,
                _ => sentence,
            };
            bare_name(span.trim())
        })
        .collect()
}

fn refine_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| ",.;:!?\"“”'’".contains(c))
        .to_string()
}

const NAME_PATTERNS: &[Pattern] = &[
    Pattern { label: "my_name_is", confidence: 0.95, matcher: match_my_name_is },
    Pattern { label: "mi_nombre_es", confidence: 0.95, matcher: match_mi_nombre_es },
    Pattern { label: "me_llamo", confidence: 0.95, matcher: match_me_llamo },
    Pattern { label: "this_is", confidence: 0.85, matcher: match_this_is },
    Pattern { label: "le_habla", confidence: 0.85, matcher: match_le_habla },
    Pattern { label: "i_am", confidence: 0.8, matcher: match_i_am },
    Pattern { label: "soy", confidence: 0.8, matcher: match_soy },
    Pattern { label: "its", confidence: 0.75, matcher: match_its },
    Pattern { label: "speaker_label", confidence: 0.7, matcher: match_speaker_label },
    Pattern { label: "sentence_start", confidence: 0.6, matcher: match_sentence_start },
];

/// The name cascade
pub const NAME_CASCADE: Cascade = Cascade {
    kind: FieldKind::Name,
    patterns: NAME_PATTERNS,
    refine: refine_name,
};

/// First raw name candidate in cascade order, before validation
pub fn extract_name(text: &str, pass: Pass) -> Option<ExtractionCandidate> {
    NAME_CASCADE.first_candidate(text, pass)
}

/// First name candidate that passes validation
pub fn extract_validated_name(text: &str, pass: Pass) -> Option<ValidatedField> {
    NAME_CASCADE.first_accepted(text, pass)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> Option<(String, String)> {
        extract_validated_name(text, Pass::Body).map(|f| (f.value, f.source.to_string()))
    }

    fn found(value: &str, pattern: &str) -> Option<(String, String)> {
        Some((value.to_string(), format!("body/{}", pattern)))
    }

    #[test]
    fn test_explicit_english_triggers() {
        assert_eq!(
            name("My name is John Smith, calling about a pothole"),
            found("John Smith", "my_name_is")
        );
        assert_eq!(
            name("hi this is Ana Lucia Torres from the east side"),
            found("Ana Lucia Torres", "this_is")
        );
        assert_eq!(name("I'm Maria."), found("Maria", "i_am"));
        assert_eq!(name("It's Dave, again"), found("Dave", "its"));
    }

    #[test]
    fn test_names_that_are_also_common_words() {
        assert_eq!(name("My name is Will Jones"), found("Will Jones", "my_name_is"));
        assert_eq!(name("this is May Chen"), found("May Chen", "this_is"));
        assert_eq!(name("Will you send someone?"), None);
    }

    #[test]
    fn test_lowercase_after_strong_trigger() {
        assert_eq!(
            name("my name is john smith and I live on Elm"),
            found("john smith", "my_name_is")
        );
    }

    #[test]
    fn test_spanish_triggers() {
        assert_eq!(
            name("Hola, me llamo Rosa Martínez y vivo en la calle Juárez"),
            found("Rosa Martínez", "me_llamo")
        );
        assert_eq!(name("mi nombre es José Luis"), found("José Luis", "mi_nombre_es"));
        assert_eq!(name("Buenas tardes, le habla Pilar"), found("Pilar", "le_habla"));
        assert_eq!(name("soy Luz"), found("Luz", "soy"));
    }

    #[test]
    fn test_weak_trigger_needs_capital() {
        assert_eq!(name("I'm calling because my street light is out"), None);
        assert_eq!(name("i'm really upset about this"), None);
        assert_eq!(name("this is ridiculous"), None);
    }

    #[test]
    fn test_later_trigger_occurrence() {
        assert_eq!(
            name("I'm calling about the light. I'm Tom Baker"),
            found("Tom Baker", "i_am")
        );
    }

    #[test]
    fn test_speaker_label() {
        assert_eq!(
            name("Agent: City services, how can I help?\nCustomer: Maria Lopez."),
            found("Maria Lopez", "speaker_label")
        );
    }

    #[test]
    fn test_sentence_start() {
        assert_eq!(name("Maria Lopez, 123 Oak Ave"), found("Maria Lopez", "sentence_start"));
        assert_eq!(name("Hi, Maria Lopez here? no. Kevin."), found("Kevin", "sentence_start"));
        assert_eq!(name("Pothole on Main Street"), None);
        assert_eq!(name("Thanks."), None);
    }

    #[test]
    fn test_raw_candidate_carries_pass() {
        let candidate = extract_name("my name is Ana", Pass::Messages).unwrap();
        assert_eq!(candidate.value, "Ana");
        assert_eq!(candidate.pattern, "my_name_is");
        assert_eq!(candidate.pass, Pass::Messages);
    }
}
