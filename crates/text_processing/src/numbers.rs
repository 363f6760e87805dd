//! Spoken-number decoding (English and Spanish)
//!
//! Callers read house numbers aloud in two styles: digit by digit
//! ("five four eight four") or in groups ("eleven twenty two",
//! "one hundred twenty two"). Group forms without a multiplier are
//! concatenated; forms with hundred/thousand are summed.

/// Class of a single number word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberWord {
    /// 0-9
    Digit(u64),
    /// Closed values that cannot absorb a following digit (10-19, veintiuno..veintinueve)
    Closed(u64),
    /// 20, 30 ... 90
    Tens(u64),
    /// hundred / cien / ciento
    Hundred,
    /// Atomic Spanish hundreds (doscientos ... novecientos)
    Hundreds(u64),
    /// thousand / mil
    Thousand,
    /// Spanish `y`
    And,
}

impl NumberWord {
    fn is_multiplier(&self) -> bool {
        matches!(self, Self::Hundred | Self::Hundreds(_) | Self::Thousand)
    }
}

fn classify(word: &str) -> Option<NumberWord> {
    use NumberWord::*;

    let word = word.to_lowercase();
    let class = match word.as_str() {
        "zero" | "oh" | "cero" => Digit(0),
        "one" | "uno" | "una" | "un" => Digit(1),
        "two" | "dos" => Digit(2),
        "three" | "tres" => Digit(3),
        "four" | "cuatro" => Digit(4),
        "five" | "cinco" => Digit(5),
        "six" | "seis" => Digit(6),
        "seven" | "siete" => Digit(7),
        "eight" | "ocho" => Digit(8),
        "nine" | "nueve" => Digit(9),

        "ten" | "diez" => Closed(10),
        "eleven" | "once" => Closed(11),
        "twelve" | "doce" => Closed(12),
        "thirteen" | "trece" => Closed(13),
        "fourteen" | "catorce" => Closed(14),
        "fifteen" | "quince" => Closed(15),
        "sixteen" | "dieciséis" | "dieciseis" => Closed(16),
        "seventeen" | "diecisiete" => Closed(17),
        "eighteen" | "dieciocho" => Closed(18),
        "nineteen" | "diecinueve" => Closed(19),
        "veintiuno" | "veintiún" | "veintiun" => Closed(21),
        "veintidós" | "veintidos" => Closed(22),
        "veintitrés" | "veintitres" => Closed(23),
        "veinticuatro" => Closed(24),
        "veinticinco" => Closed(25),
        "veintiséis" | "veintiseis" => Closed(26),
        "veintisiete" => Closed(27),
        "veintiocho" => Closed(28),
        "veintinueve" => Closed(29),

        "twenty" | "veinte" => Tens(20),
        "thirty" | "treinta" => Tens(30),
        "forty" | "fourty" | "cuarenta" => Tens(40),
        "fifty" | "cincuenta" => Tens(50),
        "sixty" | "sesenta" => Tens(60),
        "seventy" | "setenta" => Tens(70),
        "eighty" | "ochenta" => Tens(80),
        "ninety" | "noventa" => Tens(90),

        "hundred" | "cien" | "ciento" => Hundred,
        "doscientos" | "doscientas" => Hundreds(200),
        "trescientos" | "trescientas" => Hundreds(300),
        "cuatrocientos" | "cuatrocientas" => Hundreds(400),
        "quinientos" | "quinientas" => Hundreds(500),
        "seiscientos" | "seiscientas" => Hundreds(600),
        "setecientos" | "setecientas" => Hundreds(700),
        "ochocientos" | "ochocientas" => Hundreds(800),
        "novecientos" | "novecientas" => Hundreds(900),
        "thousand" | "mil" => Thousand,

        "y" => And,
        _ => return None,
    };
    Some(class)
}

/// True if `word` is a recognized number word (including Spanish `y`)
pub fn is_number_word(word: &str) -> bool {
    classify(word).is_some()
}

/// One compound group being accumulated
#[derive(Debug, Default)]
struct Group {
    /// Value already multiplied by thousand
    total: u64,
    /// Sub-thousand value
    current: u64,
    tokens: usize,
    has_multiplier: bool,
    last: Option<NumberWord>,
}

impl Group {
    fn is_empty(&self) -> bool {
        self.tokens == 0
    }

    fn value(&self) -> Option<u64> {
        self.total.checked_add(self.current)
    }

    fn last_is_multiplier(&self) -> bool {
        self.last.is_some_and(|w| w.is_multiplier())
    }

    fn push(&mut self, word: NumberWord, current: u64) {
        self.current = current;
        self.tokens += 1;
        self.has_multiplier |= word.is_multiplier();
        self.last = Some(word);
    }
}

/// Decode a sequence of number words into one integer.
///
/// Returns `None` for an empty sequence, an unrecognized word, or overflow.
///
/// # Examples
/// ```
/// use intake_text_processing::numbers::decode;
/// assert_eq!(decode(&["eleven", "twenty", "two"]), Some(1122));
/// assert_eq!(decode(&["five", "four", "eight", "four"]), Some(5484));
/// assert_eq!(decode(&["treinta", "y", "cinco"]), Some(35));
/// assert_eq!(decode(&["nine", "oh", "five"]), Some(905));
/// ```
pub fn decode<S: AsRef<str>>(words: &[S]) -> Option<u64> {
    let classes = words
        .iter()
        .map(|w| classify(w.as_ref()))
        .collect::<Option<Vec<_>>>()?;

    let classes: Vec<NumberWord> = classes
        .into_iter()
        .filter(|c| *c != NumberWord::And)
        .collect();

    if classes.is_empty() {
        return None;
    }

    if classes.iter().all(|c| matches!(c, NumberWord::Digit(_))) {
        return decode_digits(&classes);
    }

    decode_groups(&classes)
}

fn decode_digits(classes: &[NumberWord]) -> Option<u64> {
    let digits: String = classes
        .iter()
        .filter_map(|c| match c {
            NumberWord::Digit(d) => char::from_digit(*d as u32, 10),
            _ => None,
        })
        .collect();
    digits.parse().ok()
}

fn decode_groups(classes: &[NumberWord]) -> Option<u64> {
    let mut segments: Vec<u64> = Vec::new();
    let mut group = Group::default();

    for &word in classes {
        match word {
            NumberWord::Digit(0) => {
                if group.last_is_multiplier() {
                    continue;
                }
                if !group.is_empty() {
                    segments.push(group.value()?);
                    group = Group::default();
                }
                group.push(word, 0);
            }
            NumberWord::Digit(d) => {
                let absorbs = group.is_empty()
                    || group.last_is_multiplier()
                    || (matches!(group.last, Some(NumberWord::Tens(_))) && group.current % 10 == 0);
                if !absorbs {
                    segments.push(group.value()?);
                    group = Group::default();
                }
                let current = group.current.checked_add(d)?;
                group.push(word, current);
            }
            NumberWord::Closed(n) | NumberWord::Tens(n) => {
                let absorbs =
                    group.is_empty() || (group.has_multiplier && group.current % 100 == 0);
                if !absorbs {
                    segments.push(group.value()?);
                    group = Group::default();
                }
                let current = group.current.checked_add(n)?;
                group.push(word, current);
            }
            NumberWord::Hundred => {
                let current = group.current.max(1).checked_mul(100)?;
                group.push(word, current);
            }
            NumberWord::Hundreds(n) => {
                let absorbs = group.is_empty() || (group.has_multiplier && group.current == 0);
                if !absorbs {
                    segments.push(group.value()?);
                    group = Group::default();
                }
                group.push(word, n);
            }
            NumberWord::Thousand => {
                let thousands = group.current.max(1).checked_mul(1000)?;
                group.total = group.total.checked_add(thousands)?;
                group.push(word, 0);
            }
            NumberWord::And => {}
        }
    }

    if !group.is_empty() {
        segments.push(group.value()?);
    }

    match segments.as_slice() {
        [] => None,
        [single] => Some(*single),
        many => many
            .iter()
            .map(|s| s.to_string())
            .collect::<String>()
            .parse()
            .ok(),
    }
}

/// Byte span and cleaned words of the number-word run at the head of `text`
pub(crate) fn leading_run(text: &str) -> Option<(usize, usize, Vec<String>)> {
    let mut words: Vec<String> = Vec::new();
    let mut start = None;
    let mut end = 0;
    // Byte end of the run before any trailing `y`
    let mut committed: Option<(usize, usize)> = None;

    for (tok_start, token) in split_with_offsets(text) {
        let core = token.trim_end_matches(|c: char| ",.;:!?".contains(c));
        let punctuated = core.len() < token.len();
        let pieces: Vec<&str> = core.split('-').collect();

        if core.is_empty() || !pieces.iter().all(|p| !p.is_empty() && is_number_word(p)) {
            break;
        }

        start.get_or_insert(tok_start);
        end = tok_start + core.len();
        words.extend(pieces.iter().map(|p| p.to_lowercase()));

        if words.last().map(String::as_str) != Some("y") {
            committed = Some((words.len(), end));
        }

        if punctuated {
            break;
        }
    }

    let (count, end) = committed.unwrap_or((0, end));
    words.truncate(count);
    if words.is_empty() {
        return None;
    }
    Some((start.unwrap_or(0), end, words))
}

fn split_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_whitespace().map(move |token| {
        let offset = token.as_ptr() as usize - text.as_ptr() as usize;
        (offset, token)
    })
}

/// The contiguous number-word run at the head of `text`.
///
/// Hyphenated tokens (`twenty-two`) are split; a trailing Spanish `y` is
/// dropped. Returns an empty vector when `text` does not start with a
/// number word.
pub fn leading_number_words(text: &str) -> Vec<String> {
    leading_run(text).map(|(_, _, words)| words).unwrap_or_default()
}

/// Rewrite the leading number-word run of `text` as digits.
///
/// `"eleven twenty two Main Street"` becomes `"1122 Main Street"`. Text that
/// does not start with a decodable run is returned unchanged.
pub fn normalize_leading_number(text: &str) -> String {
    let trimmed = text.trim_start();
    match leading_run(trimmed) {
        Some((start, end, words)) => match decode(&words) {
            Some(number) => format!("{}{}{}", &trimmed[..start], number, &trimmed[end..]),
            None => trimmed.to_string(),
        },
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_by_digit() {
        assert_eq!(decode(&["five", "four", "eight", "four"]), Some(5484));
        assert_eq!(decode(&["nine", "oh", "five"]), Some(905));
        assert_eq!(decode(&["uno", "dos", "tres"]), Some(123));
    }

    #[test]
    fn test_concatenated_groups() {
        assert_eq!(decode(&["eleven", "twenty", "two"]), Some(1122));
        assert_eq!(decode(&["four", "twenty"]), Some(420));
        assert_eq!(decode(&["twenty", "oh", "five"]), Some(2005));
        assert_eq!(decode(&["nineteen", "eighty", "four"]), Some(1984));
    }

    #[test]
    fn test_multiplier_forms_sum() {
        assert_eq!(decode(&["one", "hundred", "twenty", "two"]), Some(122));
        assert_eq!(decode(&["two", "thousand", "five", "hundred"]), Some(2500));
        assert_eq!(decode(&["two", "thousand", "twenty", "four"]), Some(2024));
        assert_eq!(decode(&["one", "hundred", "oh", "five"]), Some(105));
        assert_eq!(decode(&["hundred"]), Some(100));
    }

    #[test]
    fn test_spanish_forms() {
        assert_eq!(decode(&["treinta", "y", "cinco"]), Some(35));
        assert_eq!(decode(&["veintidós"]), Some(22));
        assert_eq!(decode(&["doscientos", "cincuenta"]), Some(250));
        assert_eq!(decode(&["dos", "mil", "quinientos"]), Some(2500));
        assert_eq!(decode(&["ciento", "veinte"]), Some(120));
        assert_eq!(decode(&["mil", "cien"]), Some(1100));
    }

    #[test]
    fn test_rejects_empty_and_unknown() {
        let empty: [&str; 0] = [];
        assert_eq!(decode(&empty), None);
        assert_eq!(decode(&["y"]), None);
        assert_eq!(decode(&["twenty", "banana"]), None);
    }

    #[test]
    fn test_overflow_is_none() {
        let words = vec!["nine"; 25];
        assert_eq!(decode(&words), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(decode(&["Eleven", "TWENTY", "two"]), Some(1122));
    }

    #[test]
    fn test_leading_number_words() {
        assert_eq!(
            leading_number_words("eleven twenty two Main Street"),
            vec!["eleven", "twenty", "two"]
        );
        assert_eq!(leading_number_words("twenty-two Oak Ave"), vec!["twenty", "two"]);
        assert_eq!(leading_number_words("treinta y Reforma"), vec!["treinta"]);
        assert!(leading_number_words("Main Street").is_empty());
    }

    #[test]
    fn test_normalize_leading_number() {
        assert_eq!(
            normalize_leading_number("eleven twenty two Main Street"),
            "1122 Main Street"
        );
        assert_eq!(normalize_leading_number("twenty-two Oak Ave"), "22 Oak Ave");
        assert_eq!(normalize_leading_number("five four, Elm St"), "54, Elm St");
        assert_eq!(normalize_leading_number("123 Oak Ave"), "123 Oak Ave");
    }
}
