// Label-adjacent and blind candidate scanning for a single field

use std::cmp::Ordering;
use std::collections::HashSet;

use log::{debug, trace};

use crate::models::{FieldCandidate, LabelSet};
use crate::processing::labels::LabelMatcher;
use crate::processing::script::ScriptNormalizer;

/// Priority of a value found next to its label.
pub const LABEL_ADJACENT: u8 = 1;
/// Priority of a value found by testing every line against the field shape.
pub const BLIND_SCAN: u8 = 2;

/// Number of lines after a label line that may hold the value.
const LOOKAHEAD_LINES: usize = 2;

/// Validity predicate of a field. Returns the normalized value when the raw
/// text is acceptable.
pub trait CandidateValidator {
    fn accept(&self, raw: &str) -> Option<String>;
}

impl<F> CandidateValidator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn accept(&self, raw: &str) -> Option<String> {
        self(raw)
    }
}

/// Labels, exclusions and fallback policy for one field of one profile.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub labels: LabelSet,
    /// Label lines that also match one of these are not label lines for this
    /// field (`IME` inside `PREZIME`).
    pub conflicting: LabelSet,
    pub excluded: Vec<String>,
    printed_labels: HashSet<String>,
    pub blind_scan: bool,
}

impl FieldRule {
    pub fn new(field: &'static str, labels: LabelSet) -> Self {
        FieldRule {
            field,
            labels,
            conflicting: LabelSet::default(),
            excluded: Vec::new(),
            printed_labels: HashSet::new(),
            blind_scan: false,
        }
    }

    pub fn conflicting(mut self, labels: LabelSet) -> Self {
        self.conflicting = labels;
        self
    }

    pub fn excluding(mut self, tokens: Vec<String>) -> Self {
        self.excluded = tokens;
        self
    }

    pub fn printed_labels(mut self, labels: &[String]) -> Self {
        self.printed_labels = labels.iter().map(|label| ScriptNormalizer::to_canonical(label)).collect();
        self
    }

    pub fn with_blind_scan(mut self, enabled: bool) -> Self {
        self.blind_scan = enabled;
        self
    }

    /// A region that names a label, or contains a noise token, is never a value.
    fn is_noise(&self, region: &str) -> bool {
        LabelMatcher::contains_any_token(region, &self.excluded)
            || self.printed_labels.contains(&ScriptNormalizer::to_canonical(region))
    }
}

pub struct CandidateScanner;

impl CandidateScanner {
    /// Candidates for one field, best first.
    pub fn scan(lines: &[&str], rule: &FieldRule, validator: &dyn CandidateValidator) -> Vec<FieldCandidate> {
        let mut candidates = Self::scan_label_adjacent(lines, rule, validator);

        if candidates.is_empty() && rule.blind_scan {
            debug!("{}: no label-adjacent value, falling back to blind scan", rule.field);
            candidates = Self::scan_blind(lines, rule, validator);
        }

        rank(&mut candidates);
        candidates
    }

    pub fn best(lines: &[&str], rule: &FieldRule, validator: &dyn CandidateValidator) -> Option<FieldCandidate> {
        Self::scan(lines, rule, validator).into_iter().next()
    }

    fn scan_label_adjacent(
        lines: &[&str],
        rule: &FieldRule,
        validator: &dyn CandidateValidator,
    ) -> Vec<FieldCandidate> {
        let mut candidates = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let hit = match LabelMatcher::find_label(line, &rule.labels) {
                Some(hit) => hit,
                None => continue,
            };
            if !rule.conflicting.is_empty() && LabelMatcher::matches_any(line, &rule.conflicting) {
                trace!("{}: line {:?} belongs to a conflicting label", rule.field, line);
                continue;
            }

            trace!("{}: {:?} label {:?} on line {}", rule.field, hit.script, hit.label, i);
            let remainder = hit.remainder(line);
            if !remainder.is_empty() {
                if let Some(candidate) = evaluate(&remainder, rule, validator, LABEL_ADJACENT) {
                    candidates.push(candidate);
                    continue;
                }
            }

            // OCR often pushes the value onto the next line, sometimes after a
            // blank one.
            for next in lines.iter().skip(i + 1).take(LOOKAHEAD_LINES) {
                let region = LabelMatcher::trim_value(next);
                if region.is_empty() {
                    continue;
                }
                if rule.is_noise(region) {
                    debug!("{}: stopped at label or noise line {:?}", rule.field, region);
                    break;
                }
                if let Some(candidate) = evaluate(region, rule, validator, LABEL_ADJACENT) {
                    candidates.push(candidate);
                    break;
                }
            }
        }

        candidates
    }

    fn scan_blind(lines: &[&str], rule: &FieldRule, validator: &dyn CandidateValidator) -> Vec<FieldCandidate> {
        lines
            .iter()
            .map(|line| LabelMatcher::trim_value(line))
            .filter(|line| !line.is_empty())
            .filter(|line| !LabelMatcher::contains_any_token(line, &rule.excluded))
            .filter_map(|line| evaluate(line, rule, validator, BLIND_SCAN))
            .collect()
    }
}

/// Tries the whole region first, then each whitespace-separated token.
fn evaluate(
    region: &str,
    rule: &FieldRule,
    validator: &dyn CandidateValidator,
    priority: u8,
) -> Option<FieldCandidate> {
    if !rule.is_noise(region) {
        if let Some(value) = validator.accept(region) {
            return Some(candidate(value, region, priority));
        }
        debug!("{}: rejected candidate {:?}", rule.field, region);
    }

    for token in region.split_whitespace() {
        let token = LabelMatcher::trim_value(token);
        if token.is_empty() || rule.is_noise(token) {
            continue;
        }
        if let Some(value) = validator.accept(token) {
            return Some(candidate(value, region, priority));
        }
    }

    None
}

fn candidate(value: String, region: &str, priority: u8) -> FieldCandidate {
    let region_chars = region.chars().filter(|c| c.is_alphanumeric()).count();
    let value_chars = value.chars().filter(|c| c.is_alphanumeric()).count();
    let match_ratio = if region_chars == 0 {
        0.0
    } else {
        (value_chars as f32 / region_chars as f32).min(1.0)
    };

    FieldCandidate {
        value,
        priority,
        match_ratio,
    }
}

/// Ascending priority, then descending match ratio; first occurrence of a
/// value is kept.
fn rank(candidates: &mut Vec<FieldCandidate>) {
    candidates.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.match_ratio.partial_cmp(&a.match_ratio).unwrap_or(Ordering::Equal))
    });
    let mut seen = HashSet::new();
    candidates.retain(|candidate| seen.insert(candidate.value.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_only(raw: &str) -> Option<String> {
        let value: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if value.len() >= 4 && value.chars().all(|c| c.is_ascii_digit()) {
            Some(value)
        } else {
            None
        }
    }

    fn number_rule() -> FieldRule {
        let labels = LabelSet::new(&["BROJ"], &[]);
        let printed = vec!["BROJ".to_string(), "DATUM".to_string()];
        FieldRule::new("number", labels)
            .excluding(printed.clone())
            .printed_labels(&printed)
            .with_blind_scan(true)
    }

    #[test]
    fn test_same_line_value() {
        let lines = ["BROJ: 123456"];
        let found = CandidateScanner::scan(&lines, &number_rule(), &digits_only);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "123456");
        assert_eq!(found[0].priority, LABEL_ADJACENT);
        assert_eq!(found[0].match_ratio, 1.0);
    }

    #[test]
    fn test_value_after_blank_line() {
        let lines = ["BROJ", "", "9876"];
        let best = CandidateScanner::best(&lines, &number_rule(), &digits_only).unwrap();
        assert_eq!(best.value, "9876");
        assert_eq!(best.priority, LABEL_ADJACENT);
    }

    #[test]
    fn test_lookahead_stops_at_next_label() {
        let lines = ["BROJ", "DATUM", "4444"];
        let found = CandidateScanner::scan(&lines, &number_rule().with_blind_scan(false), &digits_only);
        assert!(found.is_empty());
    }

    #[test]
    fn test_blind_scan_only_without_label_hits() {
        let lines = ["NOTHING HERE", "5555 extra", "DATUM 7777"];
        let found = CandidateScanner::scan(&lines, &number_rule(), &digits_only);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "5555");
        assert_eq!(found[0].priority, BLIND_SCAN);
        assert!(found[0].match_ratio < 1.0);
    }

    #[test]
    fn test_ranking_prefers_priority_then_ratio() {
        let mut candidates = vec![
            FieldCandidate { value: "b".into(), priority: 2, match_ratio: 1.0 },
            FieldCandidate { value: "c".into(), priority: 1, match_ratio: 0.5 },
            FieldCandidate { value: "a".into(), priority: 1, match_ratio: 0.9 },
            FieldCandidate { value: "a".into(), priority: 2, match_ratio: 0.9 },
        ];
        rank(&mut candidates);
        let order: Vec<&str> = candidates.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    fn accept_word(raw: &str) -> Option<String> {
        if raw.chars().all(|c| c.is_alphabetic()) {
            Some(raw.to_string())
        } else {
            None
        }
    }

    fn first_name_rule() -> FieldRule {
        let printed = vec!["IME".to_string(), "PREZIME".to_string()];
        FieldRule::new("first", LabelSet::new(&["IME"], &[]))
            .conflicting(LabelSet::new(&["PREZIME"], &[]))
            .excluding(printed.clone())
            .printed_labels(&printed)
    }

    #[test]
    fn test_value_containing_label_before_the_label() {
        let lines = ["PREZIME", "SELIMEVIĆ", "IME", "EDHEM"];
        let found = CandidateScanner::scan(&lines, &first_name_rule(), &accept_word);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "EDHEM");
    }

    #[test]
    fn test_value_containing_label_after_the_label() {
        let lines = ["IME", "SIMEON", "PREZIME", "KARIMEHMEDOVIĆ"];
        let found = CandidateScanner::scan(&lines, &first_name_rule(), &accept_word);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "SIMEON");

        let lines = ["IME", "DIMITRIJE", "PREZIME", "IBRAHIMEVIĆ"];
        let best = CandidateScanner::best(&lines, &first_name_rule(), &accept_word).unwrap();
        assert_eq!(best.value, "DIMITRIJE");
    }

    #[test]
    fn test_conflicting_label_lines_are_skipped() {
        let rule = FieldRule::new("first", LabelSet::new(&["IME"], &[]))
            .conflicting(LabelSet::new(&["PREZIME"], &[]));
        let lines = ["PREZIME", "HODZIC", "IME", "EDHEM"];
        let found = CandidateScanner::scan(&lines, &rule, &accept_word);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "EDHEM");
    }
}
