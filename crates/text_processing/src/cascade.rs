//! Ordered pattern cascades
//!
//! A cascade is a fixed list of labelled matchers. Each matcher proposes
//! zero or more raw candidates in text order; the first candidate (in
//! pattern order, then text order) that survives refinement and validation
//! wins. Name and address extraction share this combinator.

use intake_core::{ExtractionCandidate, FieldKind, FieldSource, Pass, ValidatedField};

use crate::validator;

/// One labelled matcher
#[derive(Clone, Copy)]
pub struct Pattern {
    /// Provenance label, e.g. `my_name_is`
    pub label: &'static str,
    /// Base confidence for a validated match
    pub confidence: f32,
    /// Raw candidates in text order
    pub matcher: fn(&str) -> Vec<String>,
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("label", &self.label)
            .field("confidence", &self.confidence)
            .finish()
    }
}

/// Ordered cascade for one field kind
#[derive(Debug, Clone, Copy)]
pub struct Cascade {
    pub kind: FieldKind,
    pub patterns: &'static [Pattern],
    /// Post-match cleanup applied before validation
    pub refine: fn(&str) -> String,
}

impl Cascade {
    /// All refined candidates in cascade order, with their base confidence
    pub fn candidates<'a>(
        &'a self,
        text: &'a str,
        pass: Pass,
    ) -> impl Iterator<Item = (ExtractionCandidate, f32)> + 'a {
        self.patterns.iter().flat_map(move |pattern| {
            (pattern.matcher)(text)
                .into_iter()
                .map(move |raw| (self.refine)(&raw))
                .filter(|value| !value.is_empty())
                .map(move |value| {
                    (
                        ExtractionCandidate {
                            value,
                            pattern: pattern.label,
                            pass,
                        },
                        pattern.confidence,
                    )
                })
        })
    }

    /// The first raw candidate, before validation
    pub fn first_candidate(&self, text: &str, pass: Pass) -> Option<ExtractionCandidate> {
        self.candidates(text, pass).next().map(|(candidate, _)| candidate)
    }

    /// The first candidate the validator accepts, tagged with pass and pattern
    pub fn first_accepted(&self, text: &str, pass: Pass) -> Option<ValidatedField> {
        self.candidates(text, pass).find_map(|(candidate, confidence)| {
            let value = validator::validate(self.kind, &candidate.value)?;
            tracing::debug!(
                kind = %self.kind,
                pass = candidate.pass.as_str(),
                pattern = candidate.pattern,
                "Accepted extraction candidate"
            );
            Some(ValidatedField::new(
                value,
                FieldSource::pattern(candidate.pass, candidate.pattern),
                confidence * candidate.pass.confidence_factor(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting_then_word(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn nothing(_text: &str) -> Vec<String> {
        Vec::new()
    }

    fn trimmed(raw: &str) -> String {
        raw.trim_matches(',').to_string()
    }

    const TEST_PATTERNS: &[Pattern] = &[
        Pattern {
            label: "nothing",
            confidence: 0.9,
            matcher: nothing,
        },
        Pattern {
            label: "every_word",
            confidence: 0.5,
            matcher: greeting_then_word,
        },
    ];

    const TEST_CASCADE: Cascade = Cascade {
        kind: FieldKind::Name,
        patterns: TEST_PATTERNS,
        refine: trimmed,
    };

    #[test]
    fn test_first_candidate_is_unvalidated() {
        let candidate = TEST_CASCADE
            .first_candidate("hello, Maria", Pass::Body)
            .unwrap();
        assert_eq!(candidate.value, "hello");
        assert_eq!(candidate.pattern, "every_word");
    }

    #[test]
    fn test_rejected_candidates_are_skipped() {
        let field = TEST_CASCADE
            .first_accepted("hello, Maria", Pass::Transcript)
            .unwrap();
        assert_eq!(field.value, "Maria");
        assert_eq!(field.source.to_string(), "transcript/every_word");
        assert!((field.confidence - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_no_accepted_candidate() {
        assert!(TEST_CASCADE.first_accepted("hello, thanks", Pass::Body).is_none());
    }
}
