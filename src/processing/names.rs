use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "Capitalized Word Capitalized Word", two to four words, letters only
    static ref CAPITALIZED_NAME: Regex =
        Regex::new(r"^\p{Lu}\p{Ll}+(?:[ '-]\p{Lu}\p{Ll}+){1,3}$").unwrap();
}

/// Strips digits and slashes, collapses whitespace and title-cases each word.
pub fn clean_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_numeric() && *c != '/' && *c != '\\')
        .collect();

    stripped
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validity predicate for name fields: the cleaned value must be made of
/// letters (with inner hyphens or apostrophes) and hold at least two letters.
/// Mostly-numeric text is an ID or a date, not a name with OCR noise.
pub fn accept_name(raw: &str) -> Option<String> {
    let raw_digits = raw.chars().filter(|c| c.is_numeric()).count();
    let raw_letters = raw.chars().filter(|c| c.is_alphabetic()).count();
    if raw_digits * 2 > raw_letters {
        return None;
    }

    let cleaned = clean_name(raw);
    let letters = cleaned.chars().filter(|c| c.is_alphabetic()).count();
    let well_formed = cleaned
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');

    if letters >= 2 && well_formed && cleaned.chars().next().map_or(false, |c| c.is_alphabetic()) {
        Some(cleaned)
    } else {
        None
    }
}

/// True for lines such as `John Smith`: capitalized words only, no digits or
/// symbols.
pub fn looks_like_full_name(line: &str) -> bool {
    CAPITALIZED_NAME.is_match(line.trim())
}

fn title_case(word: &str) -> String {
    // Hyphenated parts are capitalized independently
    word.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}
