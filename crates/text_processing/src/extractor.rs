//! Two-pass field extraction
//!
//! Per field, the search moves `Searching(Messages) -> Searching(Transcript)
//! -> Resolved`. Caller utterances are searched one at a time first because
//! per-speaker text gives the triggers cleaner context; the flattened
//! transcript is the fallback, and the fixed default the last resort.

use intake_core::{FieldKind, Pass, Utterance, ValidatedField};

use crate::address::ADDRESS_CASCADE;
use crate::cascade::Cascade;
use crate::name::NAME_CASCADE;
use crate::normalizer::normalize;

/// Per-field search state
#[derive(Debug, Clone, PartialEq)]
enum SearchState {
    Searching(Pass),
    Resolved(ValidatedField),
}

/// The cascade that extracts `kind`
pub fn cascade_for(kind: FieldKind) -> &'static Cascade {
    match kind {
        FieldKind::Name => &NAME_CASCADE,
        FieldKind::Address => &ADDRESS_CASCADE,
    }
}

/// Normalize a transcript line by line so speaker turns stay separated
fn normalize_transcript(transcript: &str) -> String {
    transcript
        .lines()
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract one field from a call. Never fails: falls back to the default.
pub fn extract_field(kind: FieldKind, utterances: &[Utterance], transcript: &str) -> ValidatedField {
    let cascade = cascade_for(kind);
    let mut state = SearchState::Searching(Pass::Messages);

    loop {
        state = match state {
            SearchState::Searching(Pass::Messages) => utterances
                .iter()
                .filter(|u| u.is_caller())
                .find_map(|u| cascade.first_accepted(&normalize(&u.text), Pass::Messages))
                .map(SearchState::Resolved)
                .unwrap_or_else(|| {
                    tracing::debug!(kind = %kind, "No match in caller utterances, trying transcript");
                    SearchState::Searching(Pass::Transcript)
                }),
            SearchState::Searching(_) => {
                let field = cascade
                    .first_accepted(&normalize_transcript(transcript), Pass::Transcript)
                    .unwrap_or_else(|| {
                        tracing::debug!(kind = %kind, "No match in transcript, using default");
                        ValidatedField::default_for(kind)
                    });
                SearchState::Resolved(field)
            }
            SearchState::Resolved(field) => return field,
        };
    }
}
