// Per-profile field extraction strategies and their registry

pub mod bosnian;
pub mod generic;

pub use bosnian::BosnianIdExtractor;
pub use generic::GenericExtractor;

use crate::models::{
    DocumentProfile, ExtractedFields, ExtractionOptions, FieldCandidate, LabelSet, ProfileRules, Scored,
};
use crate::processing::classifier::DocumentClassifier;
use crate::processing::dates;
use crate::processing::scanner::{CandidateScanner, FieldRule, LABEL_ADJACENT};
use crate::utils::IdScanError;

/// Extraction strategy for one card layout.
pub trait FieldExtractor: Send + Sync {
    fn profile(&self) -> DocumentProfile;

    /// Static labels, noise tokens and signatures of the layout.
    fn rules(&self) -> &ProfileRules;

    /// Runs every requested field scan over the trimmed OCR lines. `rules` is
    /// `self.rules()` with the caller's label overrides applied.
    fn extract(&self, lines: &[&str], rules: &ProfileRules, options: &ExtractionOptions) -> ExtractedFields;
}

/// Registered strategies in classification order. The generic strategy is
/// always present and used when no signature matches.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn FieldExtractor>>,
    fallback: Box<dyn FieldExtractor>,
}

impl ExtractorRegistry {
    /// Registry holding only the generic strategy.
    pub fn new() -> Self {
        ExtractorRegistry {
            extractors: Vec::new(),
            fallback: Box::new(GenericExtractor),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BosnianIdExtractor));
        registry
    }

    /// Adds a strategy, replacing any strategy already registered for the same
    /// profile. Registering a `Generic` strategy replaces the fallback.
    pub fn register(&mut self, extractor: Box<dyn FieldExtractor>) {
        let profile = extractor.profile();
        if profile == DocumentProfile::Generic {
            self.fallback = extractor;
            return;
        }
        match self.extractors.iter().position(|e| e.profile() == profile) {
            Some(index) => self.extractors[index] = extractor,
            None => self.extractors.push(extractor),
        }
    }

    pub fn get(&self, profile: DocumentProfile) -> Result<&dyn FieldExtractor, IdScanError> {
        if profile == DocumentProfile::Generic {
            return Ok(&*self.fallback);
        }
        self.extractors
            .iter()
            .find(|e| e.profile() == profile)
            .map(|e| &**e)
            .ok_or(IdScanError::ProfileNotRegistered(profile))
    }

    pub fn classify(&self, raw_text: &str) -> DocumentProfile {
        DocumentClassifier::classify_with(raw_text, self.extractors.iter().map(|e| e.rules()))
    }

    pub fn profiles(&self) -> Vec<DocumentProfile> {
        self.extractors
            .iter()
            .map(|e| e.profile())
            .chain(std::iter::once(self.fallback.profile()))
            .collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Scanner rule for one field, excluding every printed label and noise token
/// of the profile.
pub(crate) fn field_rule(field: &'static str, labels: &LabelSet, rules: &ProfileRules) -> FieldRule {
    FieldRule::new(field, labels.clone())
        .excluding(rules.excluded_tokens())
        .printed_labels(&rules.printed_labels())
}

/// Attaches the confidence of the phase that produced the candidate.
pub(crate) fn scored(candidate: Option<FieldCandidate>, label_weight: f32, blind_weight: f32) -> Option<Scored<String>> {
    candidate.map(|candidate| {
        let weight = if candidate.priority == LABEL_ADJACENT {
            label_weight
        } else {
            blind_weight
        };
        Scored::new(candidate.value, weight)
    })
}

pub(crate) fn extract_date_of_birth(lines: &[&str], rules: &ProfileRules, weight: f32) -> Option<Scored<String>> {
    let rule = field_rule("dateOfBirth", &rules.date_of_birth, rules);
    scored(CandidateScanner::best(lines, &rule, &dates::parse_date), weight, weight)
}

/// Upper-cased ID text with embedded spaces and dashes removed.
pub(crate) fn compact_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor;

    impl FieldExtractor for FixedExtractor {
        fn profile(&self) -> DocumentProfile {
            DocumentProfile::BosnianNationalId
        }

        fn rules(&self) -> &ProfileRules {
            ProfileRules::for_profile(DocumentProfile::BosnianNationalId)
        }

        fn extract(&self, _lines: &[&str], _rules: &ProfileRules, _options: &ExtractionOptions) -> ExtractedFields {
            ExtractedFields {
                id_number: Some(Scored::new("FIXED".to_string(), 1.0)),
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_default_registry_order() {
        let registry = ExtractorRegistry::with_defaults();
        assert_eq!(
            registry.profiles(),
            vec![DocumentProfile::BosnianNationalId, DocumentProfile::Generic]
        );
    }

    #[test]
    fn test_unregistered_profile_is_an_error() {
        let registry = ExtractorRegistry::new();
        assert!(registry.get(DocumentProfile::Generic).is_ok());
        assert!(matches!(
            registry.get(DocumentProfile::BosnianNationalId),
            Err(IdScanError::ProfileNotRegistered(DocumentProfile::BosnianNationalId))
        ));
        assert_eq!(registry.classify("BOSNA I HERCEGOVINA"), DocumentProfile::Generic);
    }

    #[test]
    fn test_register_replaces_same_profile() {
        let mut registry = ExtractorRegistry::with_defaults();
        registry.register(Box::new(FixedExtractor));
        assert_eq!(registry.profiles().len(), 2);

        let extractor = registry.get(DocumentProfile::BosnianNationalId).unwrap();
        let fields = extractor.extract(&[], extractor.rules(), &ExtractionOptions::default());
        assert_eq!(fields.id_number.unwrap().value, "FIXED");
    }

    #[test]
    fn test_compact_id() {
        assert_eq!(compact_id(" 2a-141 a80k "), "2A141A80K");
    }
}
