//! Word tables shared by the cascades and the validator
//!
//! All tables are lowercase and built once per process.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// English street suffixes, full and abbreviated
pub const STREET_SUFFIXES: &[&str] = &[
    "street", "st", "avenue", "ave", "av", "road", "rd", "boulevard", "blvd", "drive", "dr",
    "lane", "ln", "way", "court", "ct", "place", "pl", "circle", "cir", "parkway", "pkwy",
    "highway", "hwy", "terrace", "ter", "trail", "trl", "square", "sq", "loop", "pike", "alley",
];

/// Spanish street types, which precede the street name
pub const SPANISH_STREET_TYPES: &[&str] = &[
    "calle", "avenida", "av", "avda", "camino", "carretera", "paseo", "callejón", "callejon",
    "bulevar", "privada", "circuito", "calzada", "plaza", "andador", "cerrada",
];

/// Markers between a Spanish street name and its number
pub const SPANISH_NUMBER_MARKERS: &[&str] =
    &["número", "numero", "núm", "num", "no", "nro", "n°", "#"];

/// Words that can never be (part of) a person's name
const NAME_STOP_WORDS: &[&str] = &[
    // Greetings and courtesy
    "hi", "hello", "hey", "hola", "buenos", "buenas", "dias", "días", "tardes", "noches", "good",
    "morning", "afternoon", "evening", "thanks", "thank", "gracias", "please", "favor", "yes",
    "yeah", "yep", "no", "nope", "ok", "okay", "sure", "si", "sí", "bye", "goodbye", "adios",
    "adiós", "sir", "madam", "ma'am", "señor", "señora", "welcome",
    // Pronouns, auxiliaries and function words
    "i", "i'm", "im", "i’m", "me", "my", "mine", "you", "your", "we", "our", "they", "their",
    "he", "she", "him", "her", "his", "them", "it", "its", "it's", "it’s", "this", "that",
    "these", "those", "there", "there's", "here", "what", "who", "where", "when", "why", "how",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "can", "could", "should", "may", "might", "must", "just", "not",
    "so", "a", "an", "the", "and", "or", "but", "to", "of", "in", "on", "at", "for", "with",
    "from", "by", "about", "as", "if", "also", "still", "really", "very", "actually", "again",
    "like", "well", "now", "today", "right", "all", "some", "any", "one", "calling",
    "yo", "tú", "tu", "usted", "ustedes", "el", "él", "ella", "la", "lo", "los", "las", "un",
    "una", "unos", "de", "del", "en", "con", "sin", "mi", "mis", "su", "sus", "que", "qué",
    "es", "soy", "son", "estoy", "está", "esta", "estamos", "tengo", "tiene", "hay", "y", "o",
    "pero", "porque", "para", "por", "muy", "aquí", "aqui", "ahí", "también", "llamo",
    // Calling gerunds and verbs
    "reporting", "having", "looking", "trying", "going", "gonna", "getting", "wondering",
    "writing", "texting", "living", "wanting", "needing", "asking", "checking", "following",
    "upset", "concerned", "worried", "sorry", "glad", "happy", "fine",
    "llamando", "reportando", "teniendo", "buscando", "escribiendo", "hablando", "viviendo",
    "need", "want", "live", "call", "called", "report", "reported", "help",
    // Generic nouns from civic reports
    "problem", "problems", "issue", "issues", "question", "complaint", "request", "emergency",
    "water", "light", "lights", "streetlight", "power", "trash", "garbage", "pothole",
    "potholes", "tree", "noise", "neighbor", "neighbors", "city", "department", "service",
    "someone", "somebody", "nobody", "anonymous", "unknown", "none", "null", "house", "home",
    "car", "dog", "park", "sidewalk", "leak", "flooding", "english", "spanish", "inglés",
    "ingles", "español", "espanol",
    "problema", "problemas", "agua", "luz", "basura", "ruido", "vecino", "vecinos", "ciudad",
    "ayuda", "servicio", "queja", "bache", "baches", "árbol", "arbol", "alumbrado", "drenaje",
    "fuga", "casa", "perro", "anónimo", "anonimo",
    // Speaker labels
    "customer", "caller", "cliente", "user", "usuario", "agent", "agente", "operator",
];

/// Given names that collide with common words
pub const ALLOWED_GIVEN_NAMES: &[&str] = &[
    // English auxiliaries
    "will", "may",
    // Spanish
    "luz", "rosa", "cruz", "sol", "paz", "mercedes", "dolores", "pilar", "consuelo", "rocío",
    "rocio", "amparo", "soledad", "esperanza", "caridad", "guadalupe", "lupe", "rosario",
    "socorro", "gloria", "victoria", "estrella", "flor", "blanca", "alba", "aurora", "reyes",
    "jesús", "jesus", "santos", "trinidad", "ángeles", "angeles", "concepción", "concepcion",
];

/// Tokens that end a backwards walk from a street suffix
const ADDRESS_BOUNDARY_WORDS: &[&str] = &[
    "a", "an", "the", "on", "at", "in", "near", "by", "to", "from", "of", "for", "and", "or",
    "but", "is", "are", "was", "be", "it", "it's", "there", "there's", "that", "this", "my",
    "our", "your", "their", "i", "i'm", "we", "you", "live", "lives", "living", "located",
    "calling", "about", "street's", "en", "la", "el", "de", "del", "los", "las", "mi", "su",
    "por", "y", "o", "vivo", "estoy", "hay", "with", "across", "behind", "off", "down", "up",
];

static NAME_STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    NAME_STOP_WORDS
        .iter()
        .chain(STREET_SUFFIXES.iter())
        .chain(SPANISH_STREET_TYPES.iter())
        .copied()
        .collect()
});

static ALLOWED_NAME_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_GIVEN_NAMES.iter().copied().collect());

static ADDRESS_BOUNDARY_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ADDRESS_BOUNDARY_WORDS.iter().copied().collect());

/// True if `word` is in the stop/common set (case-insensitive)
pub fn is_name_stop_word(word: &str) -> bool {
    NAME_STOP_SET.contains(word.to_lowercase().as_str())
}

/// True if `word` is an allow-listed given name (case-insensitive)
pub fn is_allowed_given_name(word: &str) -> bool {
    ALLOWED_NAME_SET.contains(word.to_lowercase().as_str())
}

pub fn is_address_boundary(word: &str) -> bool {
    ADDRESS_BOUNDARY_SET.contains(word.to_lowercase().as_str())
}

pub fn is_street_suffix(word: &str) -> bool {
    let lower = word.to_lowercase();
    STREET_SUFFIXES.contains(&lower.as_str())
}

pub fn is_spanish_street_type(word: &str) -> bool {
    let lower = word.to_lowercase();
    SPANISH_STREET_TYPES.contains(&lower.as_str())
}

pub fn is_spanish_number_marker(word: &str) -> bool {
    let lower = word.to_lowercase();
    SPANISH_NUMBER_MARKERS.contains(&lower.as_str())
}

/// Strip trailing sentence punctuation; the flag reports whether any was removed
pub fn strip_trailing_punct(token: &str) -> (&str, bool) {
    let core = token.trim_end_matches(|c: char| ",.;:!?\"”)".contains(c));
    (core, core.len() < token.len())
}

/// Name-shaped: starts with a letter, only letters/apostrophes/hyphens,
/// at least two characters, and not a stop word unless allow-listed
pub fn is_name_shaped(word: &str) -> bool {
    let starts_with_letter = word.chars().next().is_some_and(char::is_alphabetic);
    let well_formed = word
        .chars()
        .all(|c| c.is_alphabetic() || c == '\'' || c == '’' || c == '-');

    starts_with_letter
        && well_formed
        && word.chars().count() >= 2
        && (is_allowed_given_name(word) || !is_name_stop_word(word))
}
