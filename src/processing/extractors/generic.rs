// Fallback strategy for cards whose layout was not recognised

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{compact_id, extract_date_of_birth, field_rule, scored, FieldExtractor};
use crate::models::{DocumentProfile, ExtractedFields, ExtractionOptions, ProfileRules, Scored};
use crate::processing::labels::LabelMatcher;
use crate::processing::names::{accept_name, clean_name, looks_like_full_name};
use crate::processing::scanner::CandidateScanner;

const ID_LABEL_WEIGHT: f32 = 0.85;
const ID_BLIND_WEIGHT: f32 = 0.6;
const NAME_LABEL_WEIGHT: f32 = 0.8;
const FULL_NAME_LABEL_WEIGHT: f32 = 0.7;
const NAME_HEURISTIC_WEIGHT: f32 = 0.4;
const DATE_OF_BIRTH_WEIGHT: f32 = 0.8;

lazy_static! {
    static ref GENERIC_ID: Regex = Regex::new(r"^[A-Z0-9]{6,20}$").unwrap();
}

pub struct GenericExtractor;

impl FieldExtractor for GenericExtractor {
    fn profile(&self) -> DocumentProfile {
        DocumentProfile::Generic
    }

    fn rules(&self) -> &ProfileRules {
        ProfileRules::for_profile(DocumentProfile::Generic)
    }

    fn extract(&self, lines: &[&str], rules: &ProfileRules, options: &ExtractionOptions) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        if options.extract_id_number {
            let rule = field_rule("idNumber", &rules.id_number, rules).with_blind_scan(true);
            let best = CandidateScanner::best(lines, &rule, &accept_generic_id);
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

            if fields.first_name.is_none() || fields.last_name.is_none() {
                let full_rule = field_rule("fullName", &rules.full_name, rules)
                    .conflicting(rules.first_name.union(&rules.last_name));
                fields.full_name = scored(
                    CandidateScanner::best(lines, &full_rule, &accept_name),
                    FULL_NAME_LABEL_WEIGHT,
                    FULL_NAME_LABEL_WEIGHT,
                );
            }

            if fields.first_name.is_none() && fields.last_name.is_none() && fields.full_name.is_none() {
                fields.full_name = name_shaped_line(lines, rules);
            }
        }

        if options.extract_date_of_birth {
            fields.date_of_birth = extract_date_of_birth(lines, rules, DATE_OF_BIRTH_WEIGHT);
        }

        fields
    }
}

/// Alphanumeric, at least six characters, with at least one letter and one
/// digit so that bare labels and bare numbers are never taken for an ID.
fn accept_generic_id(raw: &str) -> Option<String> {
    let compact = compact_id(raw);
    let has_letter = compact.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = compact.chars().any(|c| c.is_ascii_digit());
    if has_letter && has_digit && GENERIC_ID.is_match(&compact) {
        Some(compact)
    } else {
        None
    }
}

fn name_shaped_line(lines: &[&str], rules: &ProfileRules) -> Option<Scored<String>> {
    let excluded = rules.excluded_tokens();
    let line = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !LabelMatcher::contains_any_token(line, &excluded))
        .find(|line| looks_like_full_name(line))?;

    debug!("falling back to name-shaped line {:?}", line);
    Some(Scored::new(clean_name(line), NAME_HEURISTIC_WEIGHT))
}
