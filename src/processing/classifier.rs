use log::debug;

use crate::models::{DocumentProfile, ProfileRules};
use crate::processing::labels::LabelMatcher;

/// Picks the card layout from text signatures (official country name, card
/// title, layout-specific label words) in either script.
pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Classifies against the built-in profiles.
    pub fn classify(raw_text: &str) -> DocumentProfile {
        Self::classify_with(
            raw_text,
            std::iter::once(ProfileRules::for_profile(DocumentProfile::BosnianNationalId)),
        )
    }

    /// First profile, in the given order, with a signature present in the
    /// text wins. No match yields `Generic`.
    pub fn classify_with<'a, I>(raw_text: &str, candidates: I) -> DocumentProfile
    where
        I: IntoIterator<Item = &'a ProfileRules>,
    {
        for rules in candidates {
            if let Some(signature) = rules
                .signatures
                .iter()
                .find(|signature| LabelMatcher::contains_token(raw_text, signature))
            {
                debug!("classified as {:?} by signature {:?}", rules.profile, signature);
                return rules.profile;
            }
        }
        DocumentProfile::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_name_in_either_script() {
        assert_eq!(
            DocumentClassifier::classify("Bosna i Hercegovina\nLIČNA KARTA"),
            DocumentProfile::BosnianNationalId
        );
        assert_eq!(
            DocumentClassifier::classify("БОСНА И ХЕРЦЕГОВИНА"),
            DocumentProfile::BosnianNationalId
        );
    }

    #[test]
    fn test_layout_labels_are_signatures() {
        assert_eq!(
            DocumentClassifier::classify("SERIJSKI BROJ\n2A141A80K"),
            DocumentProfile::BosnianNationalId
        );
        assert_eq!(
            DocumentClassifier::classify("IME\nEDHEM\nPREZIME/SURNAME\nHODŽIĆ"),
            DocumentProfile::BosnianNationalId
        );
    }

    #[test]
    fn test_unknown_layout_is_generic() {
        assert_eq!(DocumentClassifier::classify("John Smith"), DocumentProfile::Generic);
        assert_eq!(DocumentClassifier::classify(""), DocumentProfile::Generic);
        assert_eq!(DocumentClassifier::classify("SURNAME SMITH"), DocumentProfile::Generic);
    }

    #[test]
    fn test_first_match_wins() {
        let generic = ProfileRules::for_profile(DocumentProfile::Generic);
        let bosnian = ProfileRules::for_profile(DocumentProfile::BosnianNationalId);
        let profile = DocumentClassifier::classify_with("LIČNA KARTA", vec![generic, bosnian]);
        assert_eq!(profile, DocumentProfile::BosnianNationalId);
        let profile = DocumentClassifier::classify_with("LIČNA KARTA", Vec::new());
        assert_eq!(profile, DocumentProfile::Generic);
    }
}
