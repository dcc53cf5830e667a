use crate::models::{LabelSet, Script};

/// Where a field label was found on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelHit {
    pub label: String,
    pub script: Script,
    /// Character offset just past the label.
    pub offset_after_label: usize,
}

impl LabelHit {
    /// Text of `line` following the label, without separator punctuation.
    pub fn remainder(&self, line: &str) -> String {
        let rest: String = line.chars().skip(self.offset_after_label).collect();
        LabelMatcher::trim_value(&rest).to_string()
    }
}

pub struct LabelMatcher;

impl LabelMatcher {
    /// Case-insensitive label search, unanchored on the left. On the right the
    /// label must end the line or be followed by a non-alphanumeric
    /// character, so `IME` is not found inside `SELIMEVIĆ`. When several labels
    /// occur the one ending furthest right wins, so `PREZIME/SURNAME` leaves
    /// no label text behind.
    pub fn find_label(line: &str, labels: &LabelSet) -> Option<LabelHit> {
        let haystack = fold(line);
        let mut best: Option<LabelHit> = None;

        for label in labels.iter() {
            let needle = fold(&label.text);
            if needle.is_empty() || needle.len() > haystack.len() {
                continue;
            }
            let found = (0..=haystack.len() - needle.len())
                .map(|start| start + needle.len())
                .filter(|&end| {
                    haystack[end - needle.len()..end] == needle[..]
                        && (end == haystack.len() || !haystack[end].is_alphanumeric())
                })
                .last();
            if let Some(end) = found {
                let better = match &best {
                    None => true,
                    Some(current) => {
                        end > current.offset_after_label
                            || (end == current.offset_after_label
                                && label.text.chars().count() > current.label.chars().count())
                    }
                };
                if better {
                    best = Some(LabelHit {
                        label: label.text.clone(),
                        script: label.script,
                        offset_after_label: end,
                    });
                }
            }
        }

        best
    }

    pub fn matches_any(line: &str, labels: &LabelSet) -> bool {
        Self::find_label(line, labels).is_some()
    }

    /// Case-insensitive containment of a whole token: the match must not be
    /// glued to letters or digits on either side.
    pub fn contains_token(line: &str, token: &str) -> bool {
        let haystack = fold(line);
        let needle = fold(token.trim());
        if needle.is_empty() || needle.len() > haystack.len() {
            return false;
        }

        (0..=haystack.len() - needle.len()).any(|start| {
            let end = start + needle.len();
            haystack[start..end] == needle[..]
                && (start == 0 || !haystack[start - 1].is_alphanumeric())
                && (end == haystack.len() || !haystack[end].is_alphanumeric())
        })
    }

    pub fn contains_any_token(line: &str, tokens: &[String]) -> bool {
        tokens.iter().any(|token| Self::contains_token(line, token))
    }

    pub fn trim_value(region: &str) -> &str {
        region.trim_matches(|c: char| c.is_whitespace() || ":;/\\|-_.,".contains(c))
    }
}

// Upper-cases char by char, keeping a one-to-one mapping so that offsets into
// the folded text are offsets into the original line.
fn fold(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surname_labels() -> LabelSet {
        LabelSet::new(&["PREZIME", "SURNAME"], &["ПРЕЗИМЕ"])
    }

    #[test]
    fn test_label_found_case_insensitively() {
        let hit = LabelMatcher::find_label("x Prezime: Hodžić", &surname_labels()).unwrap();
        assert_eq!(hit.label, "PREZIME");
        assert_eq!(hit.remainder("x Prezime: Hodžić"), "Hodžić");
    }

    #[test]
    fn test_rightmost_label_wins_on_bilingual_line() {
        let line = "PREZIME/SURNAME/ПРЕЗИМЕ";
        let hit = LabelMatcher::find_label(line, &surname_labels()).unwrap();
        assert_eq!(hit.label, "ПРЕЗИМЕ");
        assert_eq!(hit.remainder(line), "");
    }

    #[test]
    fn test_label_must_end_at_a_boundary() {
        let given = LabelSet::new(&["IME"], &["ИМЕ"]);
        assert!(LabelMatcher::find_label("SELIMEVIĆ", &given).is_none());
        assert!(LabelMatcher::find_label("KARIMEHMEDOVIĆ", &given).is_none());
        assert!(LabelMatcher::find_label("SIMEON", &given).is_none());

        let hit = LabelMatcher::find_label("#IME/GIVEN NAME", &given).unwrap();
        assert_eq!(hit.offset_after_label, 4);
        assert!(LabelMatcher::find_label("xIME", &given).is_some());
        assert!(LabelMatcher::find_label("IME: EDHEM", &given).is_some());
    }

    #[test]
    fn test_hit_reports_label_script() {
        let hit = LabelMatcher::find_label("ПРЕЗИМЕ ХОЏИЋ", &surname_labels()).unwrap();
        assert_eq!(hit.script, Script::Cyrillic);
        assert_eq!(hit.remainder("ПРЕЗИМЕ ХОЏИЋ"), "ХОЏИЋ");
        let hit = LabelMatcher::find_label("Surname: Hodžić", &surname_labels()).unwrap();
        assert_eq!(hit.script, Script::Latin);
    }

    #[test]
    fn test_no_label() {
        assert!(LabelMatcher::find_label("EDHEM", &surname_labels()).is_none());
        assert!(LabelMatcher::find_label("", &surname_labels()).is_none());
    }

    #[test]
    fn test_token_containment_respects_word_boundaries() {
        assert!(LabelMatcher::contains_token("BIH 2021", "BIH"));
        assert!(LabelMatcher::contains_token("bosna i hercegovina", "BOSNA I HERCEGOVINA"));
        assert!(!LabelMatcher::contains_token("SIMEON", "IME"));
        assert!(!LabelMatcher::contains_token("PREZIME", "IME"));
        assert!(LabelMatcher::contains_token("IME/GIVEN NAME", "IME"));
        assert!(!LabelMatcher::contains_token("IME", ""));
    }

    #[test]
    fn test_trim_value() {
        assert_eq!(LabelMatcher::trim_value(" : EDHEM / "), "EDHEM");
        assert_eq!(LabelMatcher::trim_value("01.02.1990."), "01.02.1990");
    }
}
