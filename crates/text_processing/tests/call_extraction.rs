//! Integration tests for the voice-call path
//!
//! Utterances mirror what the call-analytics webhook delivers: caller and
//! agent turns in order, plus the flattened transcript.

use intake_core::{FieldSource, Language, Utterance, DEFAULT_ADDRESS, DEFAULT_NAME};
use intake_text_processing::{extract_call_fields, IntakeExtractor};

#[test]
fn test_english_call() {
    let utterances = vec![
        Utterance::agent("311, what's the problem?").at(0.0),
        Utterance::caller("Hi, uh, my name is John Smith, calling about a pothole").at(2.1),
        Utterance::agent("Where is it?").at(6.4),
        Utterance::caller("I live at eleven twenty two Main Street").at(7.9),
    ];
    let transcript = "Agent: 311, what's the problem?\n\
        Customer: Hi, uh, my name is John Smith, calling about a pothole\n\
        Agent: Where is it?\n\
        Customer: I live at eleven twenty two Main Street";

    let result = extract_call_fields(&utterances, transcript);
    assert_eq!(result.name.value, "John Smith");
    assert_eq!(result.name.source.to_string(), "messages/my_name_is");
    assert_eq!(result.address.value, "1122 Main Street");
    assert_eq!(result.address.source.to_string(), "messages/spoken_number");
    assert_eq!(result.language, Language::English);
    assert!(result.address_is_complete());
}

#[test]
fn test_spanish_call() {
    let utterances = vec![
        Utterance::agent("Servicios de la ciudad, ¿en qué le ayudo?"),
        Utterance::caller("Hola, este... me llamo Rosa Martínez"),
        Utterance::caller("vivo en Calle Reforma número cuarenta y cinco"),
    ];
    let result = extract_call_fields(&utterances, "");

    assert_eq!(result.name.value, "Rosa Martínez");
    assert_eq!(result.language, Language::Spanish);
    assert!(result.address.value.contains("Reforma"));
    assert!(!result.address.is_default());
}

#[test]
fn test_nothing_usable_defaults_and_flags_review() {
    let utterances = vec![
        Utterance::caller("I'm calling because my street light is out"),
        Utterance::caller("it's somewhere near the park"),
    ];
    let transcript = "Customer: I'm calling because my street light is out\n\
        Customer: it's somewhere near the park";

    let result = extract_call_fields(&utterances, transcript);
    assert_eq!(result.name.value, DEFAULT_NAME);
    assert_eq!(result.name.source, FieldSource::Default);
    assert_eq!(result.address.value, DEFAULT_ADDRESS);
    assert!(result.needs_review());
}

#[test]
fn test_transcript_pass_when_utterances_are_missing() {
    let transcript = "Agent: Name please?\nCaller: Tom Baker.\nAgent: Address?\nCaller: 45 Pine St.";
    let result = IntakeExtractor::default().extract_call(&[], transcript);

    assert_eq!(result.name.value, "Tom Baker");
    assert_eq!(result.name.source.to_string(), "transcript/speaker_label");
    assert_eq!(result.address.value, "45 Pine St");
    assert_eq!(result.address.source.to_string(), "transcript/numeric");
}

#[test]
fn test_outputs_are_never_empty() {
    let samples = ["", "   ", "uh um", "...", "Customer:"];
    for sample in samples {
        let result = extract_call_fields(&[Utterance::caller(sample)], sample);
        assert!(!result.name.value.is_empty());
        assert!(!result.address.value.is_empty());
    }
}
