use std::collections::BTreeSet;

use log::{debug, info};

use crate::models::{ClaimedIdentity, ExtractedIdentity, MatchResult, MismatchField};
use crate::processing::script::ScriptNormalizer;

const MSG_VERIFIED: &str = "Identity verified";
const MSG_BOTH_MISMATCH: &str = "Name and ID number do not match the document";
const MSG_ID_MISMATCH: &str = "ID number does not match the document";
const MSG_NAME_MISMATCH: &str = "Name does not match the document";

/// How a claimed name is compared with the name read from the card. Both
/// sides are reduced to canonical form first; empty names never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameComparison {
    Exact,
    /// Tolerates partial OCR capture: either side may contain the other.
    ContainsEitherDirection,
}

impl NameComparison {
    pub fn compare(self, claimed: &str, extracted: &str) -> bool {
        let claimed = ScriptNormalizer::to_canonical(claimed);
        let extracted = ScriptNormalizer::to_canonical(extracted);
        if claimed.is_empty() || extracted.is_empty() {
            return false;
        }
        match self {
            NameComparison::Exact => claimed == extracted,
            NameComparison::ContainsEitherDirection => claimed.contains(&extracted) || extracted.contains(&claimed),
        }
    }
}

/// Compares a user's claimed identity with the identity read from the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityMatcher {
    pub first_name: NameComparison,
    pub last_name: NameComparison,
    pub full_name: NameComparison,
}

impl Default for IdentityMatcher {
    fn default() -> Self {
        IdentityMatcher {
            first_name: NameComparison::ContainsEitherDirection,
            last_name: NameComparison::ContainsEitherDirection,
            full_name: NameComparison::ContainsEitherDirection,
        }
    }
}

impl IdentityMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every name must match exactly after canonicalization.
    pub fn strict() -> Self {
        IdentityMatcher {
            first_name: NameComparison::Exact,
            last_name: NameComparison::Exact,
            full_name: NameComparison::Exact,
        }
    }

    pub fn match_identity(&self, claim: &ClaimedIdentity, extracted: &ExtractedIdentity) -> MatchResult {
        let mut mismatches = BTreeSet::new();

        let name_match = match (&extracted.first_name, &extracted.last_name) {
            (Some(first), Some(last)) => {
                let first_match = self.first_name.compare(&claim.first_name, first);
                let last_match = self.last_name.compare(&claim.last_name, last);
                if !first_match {
                    mismatches.insert(MismatchField::FirstName);
                }
                if !last_match {
                    mismatches.insert(MismatchField::LastName);
                }
                // One matching part is enough; OCR often garbles the other
                first_match || last_match
            }
            (first, last) => {
                let available = extracted.full_name.as_ref().or(first.as_ref()).or(last.as_ref());
                let matched = available.map_or(false, |name| self.full_name.compare(&claim.full_name(), name));
                if !matched {
                    mismatches.insert(MismatchField::Name);
                }
                matched
            }
        };

        let id_match = extracted
            .id_number
            .as_deref()
            .map_or(false, |id| Self::ids_match(&claim.id_number, id));
        if !id_match {
            mismatches.insert(MismatchField::IdNumber);
        }

        let success = name_match && id_match;
        let message = match (name_match, id_match) {
            (true, true) => MSG_VERIFIED,
            (false, false) => MSG_BOTH_MISMATCH,
            (true, false) => MSG_ID_MISMATCH,
            (false, true) => MSG_NAME_MISMATCH,
        };

        if success {
            info!("identity verified against {} document", extracted.document_country);
        } else {
            debug!("identity mismatch: {:?}", mismatches);
        }

        MatchResult {
            success,
            id_match,
            name_match,
            mismatches,
            message: message.to_string(),
        }
    }

    /// IDs compare exactly once case, script and separators are removed.
    pub fn ids_match(claimed: &str, extracted: &str) -> bool {
        let claimed = compact_canonical(claimed);
        !claimed.is_empty() && claimed == compact_canonical(extracted)
    }
}

fn compact_canonical(text: &str) -> String {
    ScriptNormalizer::to_canonical(text)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
