//! Street address cascade (English and Spanish)
//!
//! Patterns in priority order:
//! 1. `numeric`: house number, up to four words, street suffix
//! 2. `spoken_number`: number words, up to four words, street suffix
//! 3. `prefix_phrase`: span after "my address is", "i live at", "vivo en", ...
//! 4. `street_suffix`: any short span ending in a street suffix
//! 5. `spanish_compound`: Calle/Avenida + name + optional número marker + number
//! 6. `bare_number`: digits followed by one to three capitalized words
//!
//! After matching, a leading number-word run is rewritten as digits.

use once_cell::sync::Lazy;
use regex::Regex;

use intake_core::{ExtractionCandidate, FieldKind, Pass, ValidatedField};

use crate::cascade::{Cascade, Pattern};
use crate::lexicon::{
    is_address_boundary, is_spanish_number_marker, is_spanish_street_type, is_street_suffix,
    strip_trailing_punct,
};
use crate::numbers::{decode, leading_number_words, leading_run, normalize_leading_number};

const MAX_NAME_WORDS: usize = 4;
const MAX_PREFIX_SPAN_WORDS: usize = 8;

static PREFIX_TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:my\s+address\s+is|the\s+address\s+is|address\s+is|i\s+live\s+at|i\s+live\s+on|i'm\s+at|i’m\s+at|located\s+at|it's\s+at|mi\s+direcci[oó]n\s+es|la\s+direcci[oó]n\s+es|vivo\s+en|estoy\s+en)\b[:,]?",
    )
    .unwrap()
});

static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,6})((?:\s+\p{Lu}[\p{L}'’\-]*){1,3})").unwrap()
});

static HOUSE_NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,6}[a-zA-Z]?$").unwrap());

static HOUSE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?(\d{1,6}[a-zA-Z]?)$").unwrap());

/// Words that end a prefix-phrase span
const SPAN_CONNECTORS: &[&str] = &["and", "my", "but", "because", "pero", "porque", "so"];

/// Abbreviations whose period does not end a prefix-phrase span
const DOTTED_ABBREVIATIONS: &[&str] = &["av", "ave", "no", "núm", "num", "nro", "st", "n"];

/// Words rejected as the first word after a bare house number
const BARE_NUMBER_BLOCKERS: &[&str] = &[
    "the", "a", "an", "at", "on", "in", "to", "for", "of", "and", "or", "but", "is", "it",
];

fn tokens_with_offsets(text: &str) -> Vec<(usize, &str)> {
    text.split_whitespace()
        .map(|token| (token.as_ptr() as usize - text.as_ptr() as usize, token))
        .collect()
}

/// A street-name word: starts with a letter or digit and is not a boundary word
fn is_street_name_word(token: &str) -> bool {
    let (core, punctuated) = strip_trailing_punct(token);
    !punctuated
        && core.chars().next().is_some_and(char::is_alphanumeric)
        && core
            .chars()
            .all(|c| c.is_alphanumeric() || "'’.-".contains(c))
        && !is_address_boundary(core)
}

fn is_street_end(word: &str) -> bool {
    is_street_suffix(word) || is_spanish_street_type(word)
}

/// One to four street-name words then a suffix, starting at `tokens[from]`.
///
/// Returns the words up to and including the suffix, the shortest span first.
fn street_tail<'a>(tokens: &[(usize, &'a str)], from: usize) -> Option<Vec<&'a str>> {
    let mut words = Vec::new();
    for k in from..tokens.len().min(from + MAX_NAME_WORDS) {
        let (_, token) = tokens[k];
        if !is_street_name_word(token) {
            return None;
        }
        words.push(token);

        let (_, next) = *tokens.get(k + 1)?;
        let (suffix, _) = strip_trailing_punct(next);
        if is_street_end(suffix) {
            words.push(suffix);
            return Some(words);
        }
    }
    None
}

fn match_numeric(text: &str) -> Vec<String> {
    let tokens = tokens_with_offsets(text);
    tokens
        .iter()
        .enumerate()
        .filter(|(_, &(_, token))| HOUSE_NUMBER_TOKEN.is_match(token))
        .filter_map(|(i, &(_, token))| {
            let tail = street_tail(&tokens, i + 1)?;
            Some(format!("{} {}", token, tail.join(" ")))
        })
        .collect()
}

/// A lone Spanish article ("un bache") or a stray `y` is not a house number
fn is_article_run(words: &[String]) -> bool {
    match words {
        [only] => matches!(only.as_str(), "un" | "una"),
        [first, ..] => first == "y",
        [] => true,
    }
}

fn match_spoken_number(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut previous_was_number = false;

    let tokens = tokens_with_offsets(text);

    for &(offset, _) in &tokens {
        let head = &text[offset..];
        let run = leading_run(head);
        let is_run_start = !previous_was_number
            && run.as_ref().is_some_and(|(_, _, words)| !is_article_run(words));
        previous_was_number = run.is_some();

        if !is_run_start {
            continue;
        }
        let Some((_, run_end, _)) = run else {
            continue;
        };
        // A run closed by punctuation ("five four, Elm St") has no street tail
        if !head[run_end..].starts_with(char::is_whitespace) {
            continue;
        }
        let next = tokens.partition_point(|&(o, _)| o < offset + run_end);
        if let Some(tail) = street_tail(&tokens, next) {
            found.push(format!("{} {}", &head[..run_end], tail.join(" ")));
        }
    }

    found
}

fn match_prefix_phrase(text: &str) -> Vec<String> {
    PREFIX_TRIGGER
        .find_iter(text)
        .filter_map(|m| prefix_span(&text[m.end()..]))
        .collect()
}

/// The address-shaped span after a prefix trigger
fn prefix_span(rest: &str) -> Option<String> {
    let line = rest.split('\n').next().unwrap_or(rest);
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut words: Vec<&str> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        let lower = token.to_lowercase();
        if !words.is_empty() && SPAN_CONNECTORS.contains(&lower.as_str()) {
            break;
        }
        if lower == "y" && tokens.get(i + 1).is_some_and(|next| next.eq_ignore_ascii_case("mi")) {
            break;
        }

        let hard_stop = token.ends_with([',', ';', '!', '?']);
        let period = token.ends_with('.');
        let core = token.trim_end_matches(|c: char| ",;:!?.".contains(c));

        if !core.is_empty() {
            words.push(core);
        }
        if hard_stop || words.len() >= MAX_PREFIX_SPAN_WORDS {
            break;
        }
        if period && !DOTTED_ABBREVIATIONS.contains(&core.to_lowercase().as_str()) {
            break;
        }
    }

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn match_street_suffix(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut found = Vec::new();

    for (j, token) in tokens.iter().enumerate() {
        let (suffix, _) = strip_trailing_punct(token);
        if j == 0 || !is_street_suffix(suffix) {
            continue;
        }

        let mut start = j;
        while start > 0 && j - start < MAX_NAME_WORDS {
            let (word, punctuated) = strip_trailing_punct(tokens[start - 1]);
            if punctuated || word.is_empty() || is_address_boundary(word) || is_street_suffix(word)
            {
                break;
            }
            start -= 1;
        }

        if start < j {
            let mut words: Vec<&str> = tokens[start..j].to_vec();
            words.push(suffix);
            found.push(words.join(" "));
        }
    }

    found
}

fn match_spanish_compound(text: &str) -> Vec<String> {
    let tokens: Vec<(usize, &str)> = tokens_with_offsets(text);
    let mut found = Vec::new();

    for (i, &(_, token)) in tokens.iter().enumerate() {
        let (street_type, _) = strip_trailing_punct(token);
        if !is_spanish_street_type(street_type) {
            continue;
        }

        // Lazily grow the street name until a number follows it
        for name_len in 1..=MAX_NAME_WORDS {
            let name_tokens = match tokens.get(i + 1..i + 1 + name_len) {
                Some(slice) => slice,
                None => break,
            };
            let last = name_len - 1;
            let name_ok = name_tokens.iter().enumerate().all(|(k, &(_, t))| {
                let (core, punctuated) = strip_trailing_punct(t);
                core.chars().next().is_some_and(char::is_alphabetic)
                    && !is_spanish_number_marker(core)
                    && (!punctuated || (k == last && t.ends_with(',')))
            });
            if !name_ok {
                break;
            }

            let mut next = i + 1 + name_len;
            if tokens
                .get(next)
                .is_some_and(|&(_, t)| is_spanish_number_marker(strip_trailing_punct(t).0))
            {
                next += 1;
            }

            if let Some(number) = tokens.get(next).and_then(|&(offset, _)| house_number(&text[offset..]))
            {
                let name: Vec<&str> = name_tokens
                    .iter()
                    .map(|&(_, t)| strip_trailing_punct(t).0)
                    .collect();
                found.push(format!("{} {} {}", street_type, name.join(" "), number));
                break;
            }
        }
    }

    found
}

/// A digit house number or a decodable number-word run at the head of `text`
fn house_number(text: &str) -> Option<String> {
    let first = text.split_whitespace().next()?;
    let (core, _) = strip_trailing_punct(first);
    if let Some(caps) = HOUSE_NUMBER.captures(core) {
        return Some(caps[1].to_string());
    }
    let words = leading_number_words(text);
    if words.is_empty() {
        return None;
    }
    decode(&words).map(|n| n.to_string())
}

fn match_bare_number(text: &str) -> Vec<String> {
    BARE_NUMBER
        .captures_iter(text)
        .filter_map(|caps| {
            let words = caps.get(2)?.as_str();
            let first = words.split_whitespace().next()?.to_lowercase();
            if BARE_NUMBER_BLOCKERS.contains(&first.as_str()) {
                return None;
            }
            Some(caps.get(0)?.as_str().to_string())
        })
        .collect()
}

fn refine_address(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_matches(|c: char| ",.;:!?\"“”".contains(c))
        .trim();
    normalize_leading_number(trimmed)
}

const ADDRESS_PATTERNS: &[Pattern] = &[
    Pattern { label: "numeric", confidence: 0.95, matcher: match_numeric },
    Pattern { label: "spoken_number", confidence: 0.9, matcher: match_spoken_number },
    Pattern { label: "prefix_phrase", confidence: 0.85, matcher: match_prefix_phrase },
    Pattern { label: "street_suffix", confidence: 0.7, matcher: match_street_suffix },
    Pattern { label: "spanish_compound", confidence: 0.85, matcher: match_spanish_compound },
    Pattern { label: "bare_number", confidence: 0.6, matcher: match_bare_number },
];

/// The address cascade
pub const ADDRESS_CASCADE: Cascade = Cascade {
    kind: FieldKind::Address,
    patterns: ADDRESS_PATTERNS,
    refine: refine_address,
};

/// First raw address candidate in cascade order, before validation
pub fn extract_address(text: &str, pass: Pass) -> Option<ExtractionCandidate> {
    ADDRESS_CASCADE.first_candidate(text, pass)
}

/// First address candidate that passes validation
pub fn extract_validated_address(text: &str, pass: Pass) -> Option<ValidatedField> {
    ADDRESS_CASCADE.first_accepted(text, pass)
}
