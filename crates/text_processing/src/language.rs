//! Binary English/Spanish detection
//!
//! Runs on raw caller text: the Spanish fillers the normalizer strips
//! ("este", "pues", "bueno") are themselves strong Spanish signals. Any
//! indicator word makes the report Spanish. Words shared with English or
//! common in street names ("la", "el", "de", "calle", "no") are left out so
//! that "I live on Calle de la Luz" stays English.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use intake_core::{flatten_caller_text, Language, Utterance};

const SPANISH_INDICATORS: &[&str] = &[
    // Greetings and courtesy
    "hola", "buenos", "buenas", "gracias", "disculpe", "perdón", "perdon", "señor",
    "señora", "adiós", "adios", "sí",
    // Pronouns and function words
    "yo", "usted", "ustedes", "nosotros", "ellos", "mis", "nuestra", "nuestro",
    "que", "qué", "porque", "pero", "para", "por", "muy", "también", "tambien",
    "aquí", "aqui", "ahí", "allí", "donde", "dónde", "cuando", "cómo", "como", "una",
    "unos", "unas", "esta", "está", "estoy", "están", "estamos", "soy", "somos", "tengo",
    "tiene", "tenemos", "quiero", "necesito", "puede", "pueden", "llamo", "llamando", "vivo",
    "nombre", "dirección", "direccion", "ayuda", "hace", "desde", "hasta", "entre",
    // Fillers
    "este", "pues", "bueno", "entonces", "oye",
    // Civic vocabulary
    "problema", "agua", "basura", "ruido", "vecino", "vecinos", "fuga", "bache", "baches",
    "alumbrado", "drenaje", "banqueta", "colonia", "esquina", "enfrente", "cerca", "calles",
    "días", "semana", "ayer", "hoy", "mañana", "noche", "tarde",
];

static SPANISH_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SPANISH_INDICATORS.iter().copied().collect());

/// Detect the language of a single raw text
pub fn detect_language_text(text: &str) -> Language {
    let lower = text.to_lowercase();
    let indicator = lower
        .unicode_words()
        .find(|word| SPANISH_SET.contains(word));

    match indicator {
        Some(word) => {
            tracing::debug!(indicator = word, "Detected Spanish");
            Language::Spanish
        }
        None => Language::English,
    }
}

/// Detect the language of a call from its raw caller utterances
pub fn detect_language(utterances: &[Utterance]) -> Language {
    detect_language_text(&flatten_caller_text(utterances))
}
