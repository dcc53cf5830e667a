// Latin/Cyrillic conversion and canonical comparison form for the
// Bosnian/Serbian/Croatian alphabet family

use std::collections::HashMap;

use lazy_static::lazy_static;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Script;

lazy_static! {
    static ref CYRILLIC_TO_LATIN: HashMap<char, &'static str> = {
        let mut m = HashMap::new();
        m.insert('а', "a");
        m.insert('б', "b");
        m.insert('в', "v");
        m.insert('г', "g");
        m.insert('д', "d");
        m.insert('ђ', "đ");
        m.insert('е', "e");
        m.insert('ж', "ž");
        m.insert('з', "z");
        m.insert('и', "i");
        m.insert('ј', "j");
        m.insert('к', "k");
        m.insert('л', "l");
        m.insert('љ', "lj");
        m.insert('м', "m");
        m.insert('н', "n");
        m.insert('њ', "nj");
        m.insert('о', "o");
        m.insert('п', "p");
        m.insert('р', "r");
        m.insert('с', "s");
        m.insert('т', "t");
        m.insert('ћ', "ć");
        m.insert('у', "u");
        m.insert('ф', "f");
        m.insert('х', "h");
        m.insert('ц', "c");
        m.insert('ч', "č");
        m.insert('џ', "dž");
        m.insert('ш', "š");
        m
    };

    // Digraphs first: the longest Latin spelling of a letter is tried before
    // its single-character prefix.
    static ref LATIN_TO_CYRILLIC: Vec<(&'static str, char)> = vec![
        ("lj", 'љ'),
        ("nj", 'њ'),
        ("dž", 'џ'),
        ("a", 'а'),
        ("b", 'б'),
        ("c", 'ц'),
        ("č", 'ч'),
        ("ć", 'ћ'),
        ("d", 'д'),
        ("đ", 'ђ'),
        ("e", 'е'),
        ("f", 'ф'),
        ("g", 'г'),
        ("h", 'х'),
        ("i", 'и'),
        ("j", 'ј'),
        ("k", 'к'),
        ("l", 'л'),
        ("m", 'м'),
        ("n", 'н'),
        ("o", 'о'),
        ("p", 'п'),
        ("r", 'р'),
        ("s", 'с'),
        ("š", 'ш'),
        ("t", 'т'),
        ("u", 'у'),
        ("v", 'в'),
        ("z", 'з'),
        ("ž", 'ж'),
    ];
}

/// Stateless script conversion helpers.
pub struct ScriptNormalizer;

impl ScriptNormalizer {
    /// Normalized comparison form: lower-case, Latin script, no diacritics,
    /// no punctuation, single spaces.
    pub fn to_canonical(text: &str) -> String {
        let lowered = text.to_lowercase();
        let latin = Self::cyrillic_to_latin(&strip_diacritics(&lowered));
        let folded = strip_diacritics(&latin);

        folded
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn strings_match(a: &str, b: &str) -> bool {
        Self::to_canonical(a) == Self::to_canonical(b)
    }

    /// Transliterates Serbian/Bosnian Cyrillic to Latin, keeping case.
    /// Characters outside the table pass through unchanged.
    pub fn cyrillic_to_latin(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut result = String::with_capacity(text.len());

        for (i, &c) in chars.iter().enumerate() {
            let lower = single_lowercase(c);
            let latin = match CYRILLIC_TO_LATIN.get(&lower) {
                Some(latin) => *latin,
                None => {
                    result.push(c);
                    continue;
                }
            };

            if lower == c {
                result.push_str(latin);
            } else if latin.chars().count() == 1 {
                result.push_str(&latin.to_uppercase());
            } else {
                // Љ in an all-caps word is "LJ", at the start of a word "Lj"
                let neighbour = chars.get(i + 1).or_else(|| if i > 0 { chars.get(i - 1) } else { None });
                let shouting = neighbour.map_or(false, |n| n.is_uppercase());
                if shouting {
                    result.push_str(&latin.to_uppercase());
                } else {
                    let mut parts = latin.chars();
                    if let Some(first) = parts.next() {
                        result.extend(first.to_uppercase());
                        result.extend(parts);
                    }
                }
            }
        }

        result
    }

    /// Transliterates Latin to Serbian/Bosnian Cyrillic, matching the digraphs
    /// `lj`, `nj` and `dž` before single letters. Case is kept.
    pub fn latin_to_cyrillic(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut result = String::with_capacity(text.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let mut matched = false;
            for (latin, cyrillic) in LATIN_TO_CYRILLIC.iter() {
                let width = latin.chars().count();
                if i + width > chars.len() {
                    continue;
                }
                let window: String = chars[i..i + width].iter().map(|&c| single_lowercase(c)).collect();
                if window == *latin {
                    if chars[i].is_uppercase() {
                        result.extend(cyrillic.to_uppercase());
                    } else {
                        result.push(*cyrillic);
                    }
                    i += width;
                    matched = true;
                    break;
                }
            }
            if !matched {
                result.push(chars[i]);
                i += 1;
            }
        }

        result
    }

    /// Dominant script of the text; Latin when nothing is recognised.
    pub fn detect_script(text: &str) -> Script {
        match whatlang::detect_script(text) {
            Some(whatlang::Script::Cyrillic) => Script::Cyrillic,
            _ => Script::Latin,
        }
    }
}

fn single_lowercase(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            'ł' => 'l',
            'Ł' => 'L',
            'ø' => 'o',
            'Ø' => 'O',
            _ => c,
        })
        .collect()
}
