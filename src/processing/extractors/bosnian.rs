// Bosnia and Herzegovina national identity card (bilingual Latin/Cyrillic
// labels, serial number such as 2A141A80K)

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{compact_id, extract_date_of_birth, field_rule, scored, FieldExtractor};
use crate::models::{DocumentProfile, ExtractedFields, ExtractionOptions, ProfileRules, Scored};
use crate::processing::labels::LabelMatcher;
use crate::processing::names::{accept_name, clean_name};
use crate::processing::scanner::CandidateScanner;

const ID_LABEL_WEIGHT: f32 = 0.95;
const ID_BLIND_WEIGHT: f32 = 0.75;
const NAME_LABEL_WEIGHT: f32 = 0.9;
const SIGNATURE_WEIGHT: f32 = 0.5;
const DATE_OF_BIRTH_WEIGHT: f32 = 0.85;

lazy_static! {
    // digit-letter-digits-letter-digits-letter
    static ref SERIAL_NUMBER_SHAPES: Vec<Regex> = vec![
        Regex::new(r"^[0-9][A-Z][0-9]{3}[A-Z][0-9]{2}[A-Z]$").unwrap(),
        Regex::new(r"^[0-9]{2}[A-Z][0-9]{3}[A-Z][0-9]{2}[A-Z]$").unwrap(),
        Regex::new(r"^[0-9][A-Z][0-9]{4}[A-Z][0-9][A-Z]$").unwrap(),
    ];
}

pub struct BosnianIdExtractor;

impl FieldExtractor for BosnianIdExtractor {
    fn profile(&self) -> DocumentProfile {
        DocumentProfile::BosnianNationalId
    }

    fn rules(&self) -> &ProfileRules {
        ProfileRules::for_profile(DocumentProfile::BosnianNationalId)
    }

    fn extract(&self, lines: &[&str], rules: &ProfileRules, options: &ExtractionOptions) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        if options.extract_id_number {
            let rule = field_rule("idNumber", &rules.id_number, rules).with_blind_scan(true);
            let best = CandidateScanner::best(lines, &rule, &accept_serial_number);
            fields.id_number = scored(best, ID_LABEL_WEIGHT, ID_BLIND_WEIGHT);
        }

        if options.extract_name {
            let first_rule = field_rule("firstName", &rules.first_name, rules).conflicting(rules.last_name.clone());
            let last_rule = field_rule("lastName", &rules.last_name, rules);
            fields.first_name = scored(
                CandidateScanner::best(lines, &first_rule, &accept_name),
                NAME_LABEL_WEIGHT,
                NAME_LABEL_WEIGHT,
            );
            fields.last_name = scored(
                CandidateScanner::best(lines, &last_rule, &accept_name),
                NAME_LABEL_WEIGHT,
                NAME_LABEL_WEIGHT,
            );

            if fields.first_name.is_none() && fields.last_name.is_none() {
                if let Some((first, last)) = names_from_signature(lines, rules) {
                    debug!("names recovered from signature line: {} {}", first, last);
                    fields.first_name = Some(Scored::new(first, SIGNATURE_WEIGHT));
                    fields.last_name = Some(Scored::new(last, SIGNATURE_WEIGHT));
                }
            }
        }

        if options.extract_date_of_birth {
            fields.date_of_birth = extract_date_of_birth(lines, rules, DATE_OF_BIRTH_WEIGHT);
        }

        fields
    }
}

fn accept_serial_number(raw: &str) -> Option<String> {
    let compact = compact_id(raw);
    if SERIAL_NUMBER_SHAPES.iter().any(|shape| shape.is_match(&compact)) {
        Some(compact)
    } else {
        None
    }
}

/// Last resort: the holder's name printed or signed after the signature
/// label, first word as first name and the rest as last name.
fn names_from_signature(lines: &[&str], rules: &ProfileRules) -> Option<(String, String)> {
    let excluded = rules.excluded_tokens();

    for (i, line) in lines.iter().enumerate() {
        let hit = match LabelMatcher::find_label(line, &rules.signature) {
            Some(hit) => hit,
            None => continue,
        };

        let same_line = hit.remainder(line);
        let region = if same_line.is_empty() {
            match lines
                .iter()
                .skip(i + 1)
                .take(2)
                .map(|next| LabelMatcher::trim_value(next))
                .find(|next| !next.is_empty())
            {
                Some(next) => next.to_string(),
                None => continue,
            }
        } else {
            same_line
        };

        if LabelMatcher::contains_any_token(&region, &excluded) {
            continue;
        }

        let cleaned = clean_name(&region);
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        if words.len() >= 2 && words.iter().all(|word| accept_name(word).is_some()) {
            return Some((words[0].to_string(), words[1..].join(" ")));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, options: &ExtractionOptions) -> ExtractedFields {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let extractor = BosnianIdExtractor;
        extractor.extract(&lines, extractor.rules(), options)
    }

    const CARD: &str = "BOSNA I HERCEGOVINA\n\
        LIČNA KARTA / IDENTITY CARD\n\
        PREZIME/SURNAME/ПРЕЗИМЕ\n\
        HODŽIĆ\n\
        IME/GIVEN NAME/ИМЕ\n\
        EDHEM\n\
        DATUM ROĐENJA/DATE OF BIRTH\n\
        14.05.1987.\n\
        SPOL/SEX M\n\
        SERIJSKI BROJ/SERIAL NUMBER\n\
        2A141A80K\n\
        POTPIS/SIGNATURE";

    #[test]
    fn test_full_card() {
        let fields = extract(CARD, &ExtractionOptions::default().with_date_of_birth());
        assert_eq!(fields.first_name.unwrap().value, "Edhem");
        assert_eq!(fields.last_name.unwrap().value, "Hodžić");
        let id = fields.id_number.unwrap();
        assert_eq!(id.value, "2A141A80K");
        assert_eq!(id.confidence.value(), ID_LABEL_WEIGHT);
        assert_eq!(fields.date_of_birth.unwrap().value, "14.05.1987");
    }

    #[test]
    fn test_cyrillic_card() {
        let text = "БОСНА И ХЕРЦЕГОВИНА\nПРЕЗИМЕ\nХОЏИЋ\nИМЕ\nЕДХЕМ\nСЕРИЈСКИ БРОЈ\n2A141A80K";
        let fields = extract(text, &ExtractionOptions::default());
        assert_eq!(fields.first_name.unwrap().value, "Едхем");
        assert_eq!(fields.last_name.unwrap().value, "Хоџић");
        assert_eq!(fields.id_number.unwrap().value, "2A141A80K");
    }

    #[test]
    fn test_serial_number_with_spaces_and_dashes() {
        let fields = extract("SERIJSKI BROJ: 2A1 41-A80K", &ExtractionOptions::default());
        assert_eq!(fields.id_number.unwrap().value, "2A141A80K");
    }

    #[test]
    fn test_blind_serial_number_has_lower_confidence() {
        let fields = extract("BOSNA I HERCEGOVINA\nxx\n2A141A80K", &ExtractionOptions::default());
        let id = fields.id_number.unwrap();
        assert_eq!(id.value, "2A141A80K");
        assert_eq!(id.confidence.value(), ID_BLIND_WEIGHT);
    }

    #[test]
    fn test_serial_number_shapes() {
        assert!(accept_serial_number("2A141A80K").is_some());
        assert!(accept_serial_number("12A141A80K").is_some());
        assert!(accept_serial_number("123456789").is_none());
        assert!(accept_serial_number("SERIJSKI").is_none());
    }

    #[test]
    fn test_signature_fallback() {
        let text = "LIČNA KARTA\nPOTPIS/SIGNATURE\nEdhem Hodžić";
        let fields = extract(text, &ExtractionOptions::default());
        let first = fields.first_name.unwrap();
        assert_eq!(first.value, "Edhem");
        assert_eq!(first.confidence.value(), SIGNATURE_WEIGHT);
        assert_eq!(fields.last_name.unwrap().value, "Hodžić");
    }

    #[test]
    fn test_disabled_fields_are_not_scanned() {
        let options = ExtractionOptions {
            extract_name: false,
            extract_id_number: false,
            ..Default::default()
        };
        assert_eq!(extract(CARD, &options), ExtractedFields::default());
    }
}
