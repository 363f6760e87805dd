//! Disfluency normalization for transcripts (English and Spanish)
//!
//! Strips hesitation markers, stutters, immediate word repeats and ellipses
//! so the cascades see clean text. The raw text is kept elsewhere for
//! language detection and downstream classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::strip_trailing_punct;
use crate::numbers::is_number_word;

// Fillers only match whole words; "umbrella" and "Bueno Vista" prefixes are safe
// because of the word boundaries, and an immediately following comma goes with them.
static FILLERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:uh+|uhm|um+|erm?|ah+|hmm+|hm|mhm|este|pues|bueno|entonces|o\s+sea|a\s+ver|mira|oye|verdad|sabes|eh)\b,?",
    )
    .unwrap()
});

static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}|…").unwrap());

/// Normalize disfluent text. Pure and idempotent.
///
/// # Examples
/// ```
/// use intake_text_processing::normalizer::normalize;
/// assert_eq!(normalize("um I-I live at... uh 123 Oak Ave"), "I live at 123 Oak Ave");
/// ```
pub fn normalize(text: &str) -> String {
    let text = ELLIPSIS.replace_all(text, " ");

    let destuttered: Vec<String> = text.split_whitespace().map(collapse_stutter).collect();
    let mut text = destuttered.join(" ");

    // Removing a filler can bring two fillers together ("o um sea")
    loop {
        let next = FILLERS.replace_all(&text, " ").into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    dedupe_repeats(&text)
}

/// `I-I` -> `I`, `m-my` -> `my`; other hyphenated words pass through
fn collapse_stutter(token: &str) -> String {
    let core = token.trim_end_matches(|c: char| ",.;:!?".contains(c));
    let punct = &token[core.len()..];

    let parts: Vec<&str> = core.split('-').collect();
    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return token.to_string();
    }

    let last = parts[parts.len() - 1];
    let last_lower = last.to_lowercase();
    let all_equal = parts.iter().all(|p| p.to_lowercase() == last_lower);
    let prefix_stutter = parts[..parts.len() - 1].iter().all(|p| {
        let lower = p.to_lowercase();
        lower.chars().count() < last_lower.chars().count()
            && lower.chars().count() <= 2
            && last_lower.starts_with(&lower)
    });

    if all_equal {
        format!("{}{}", parts[0], punct)
    } else if prefix_stutter {
        format!("{}{}", last, punct)
    } else {
        token.to_string()
    }
}

/// Drop immediate case-insensitive repeats and collapse whitespace.
///
/// Numbers are never deduped: "five five two" is a house number.
fn dedupe_repeats(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        let repeated = out
            .last()
            .is_some_and(|prev| prev.to_lowercase() == token.to_lowercase());
        if repeated && !is_numeric_token(token) {
            continue;
        }
        out.push(token);
    }
    out.join(" ")
}

fn is_numeric_token(token: &str) -> bool {
    let (core, _) = strip_trailing_punct(token);
    !core.is_empty()
        && (core.chars().all(|c| c.is_ascii_digit())
            || core.split('-').all(|part| is_number_word(part)))
}
