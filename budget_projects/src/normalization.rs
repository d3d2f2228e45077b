use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_DIGITS: Regex = Regex::new(r"[^\d]").expect("NON_DIGITS regex to compile");
}

/// Parses a locale formatted amount such as `"100 000 zł"` or `"10 000,00 zł"`.
///
/// Everything from the first comma, then from the first period, is treated as the
/// decimal part and dropped. Returns `None` when no digits are left.
pub fn extract_cost_from_string(cost: Option<&str>) -> Option<u64> {
    let cost = cost.filter(|cost| !cost.is_empty())?;

    let integer_part = cost
        .split(',')
        .next()
        .and_then(|before_comma| before_comma.split('.').next())
        .unwrap_or_default();

    let digits = NON_DIGITS.replace_all(integer_part, "");
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Every digit of the value, decimal part included. Used for numeric category
/// codes and for amounts that are printed without a decimal part.
pub fn extract_digits(value: Option<&str>) -> Option<String> {
    let digits = NON_DIGITS.replace_all(value?, "");
    (!digits.is_empty()).then(|| digits.into_owned())
}

pub fn is_project_accepted(value: Option<&str>) -> bool {
    matches!(value, Some(value) if value.trim() == "TAK")
}

pub fn extract_first_sentence(text: &str) -> String {
    text.split('\n').next().unwrap_or_default().trim().to_string()
}

/// Multi line cell text flattened into one line.
pub fn single_line(text: &str) -> String {
    text.trim().replace('\n', " ")
}

/// Splits prose into sentences on `.`, `!` and `?` followed by whitespace.
///
/// A period does not end a sentence after one of the usual Polish abbreviations
/// (`ul.`, `al.`, `os.`...) or after a single letter initial.
pub fn split_sentences(text: &str) -> Vec<String> {
    const ABBREVIATIONS: [&str; 16] = [
        "ul", "al", "pl", "os", "im", "św", "ks", "gen", "nr", "dz", "m.in", "tj", "np", "ok",
        "ds", "bl",
    ];

    fn ends_with_abbreviation(sentence: &str) -> bool {
        let last_word = sentence
            .rsplit(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default()
            .trim_end_matches('.')
            .to_lowercase();
        let is_initial =
            last_word.chars().count() == 1 && last_word.chars().all(char::is_alphabetic);
        ABBREVIATIONS.contains(&last_word.as_str()) || is_initial
    }

    let mut sentences = vec![];
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().map_or(true, |next| next.is_whitespace());
        if !at_boundary || (c == '.' && ends_with_abbreviation(&current)) {
            continue;
        }
        let sentence = current.trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        current.clear();
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}
