use serde::Serialize;

use crate::identity_extractor::IdentityExtractor;
use crate::models::{ClaimedIdentity, ExtractedIdentity, ExtractionOptions, MatchResult};
use crate::utils::IdScanError;
use crate::validation::IdentityMatcher;

/// Outcome of one verification request: what was read from the card and how
/// it compared with the claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub extracted: ExtractedIdentity,
    pub result: MatchResult,
}

pub struct IdentityVerifier {
    extractor: IdentityExtractor,
    matcher: IdentityMatcher,
}

impl IdentityVerifier {
    pub fn new() -> Self {
        IdentityVerifier {
            extractor: IdentityExtractor::new(),
            matcher: IdentityMatcher::new(),
        }
    }

    pub fn with_parts(extractor: IdentityExtractor, matcher: IdentityMatcher) -> Self {
        IdentityVerifier { extractor, matcher }
    }

    pub fn with_options(options: ExtractionOptions) -> Self {
        Self::with_parts(IdentityExtractor::with_options(options), IdentityMatcher::new())
    }

    // Main verification function: extract, then compare with the claim
    pub fn verify(&self, raw_text: &str, claim: &ClaimedIdentity) -> Verification {
        let extracted = self.extractor.extract(raw_text);
        let result = self.matcher.match_identity(claim, &extracted);
        Verification { extracted, result }
    }

    pub fn verify_bytes(&self, raw: &[u8], claim: &ClaimedIdentity) -> Result<Verification, IdScanError> {
        let extracted = self.extractor.extract_bytes(raw)?;
        let result = self.matcher.match_identity(claim, &extracted);
        Ok(Verification { extracted, result })
    }
}

impl Default for IdentityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MismatchField;

    const CARD: &str = "BOSNA I HERCEGOVINA\nPREZIME/SURNAME\nHODŽIĆ\nIME/GIVEN NAME\nEDHEM\nSERIJSKI BROJ\n2A141A80K";

    #[test]
    fn test_claim_without_diacritics_is_verified() {
        let claim = ClaimedIdentity::new("Edhem", "Hodzic", "2a141a80k");
        let verification = IdentityVerifier::new().verify(CARD, &claim);
        assert!(verification.result.success);
        assert_eq!(verification.extracted.last_name.as_deref(), Some("Hodžić"));
    }

    #[test]
    fn test_wrong_id_is_rejected() {
        let claim = ClaimedIdentity::new("Edhem", "Hodzic", "2A141A80X");
        let verification = IdentityVerifier::new().verify(CARD, &claim);
        assert!(!verification.result.id_match);
        assert!(!verification.result.success);
        assert!(verification.result.mismatches.contains(&MismatchField::IdNumber));
    }

    #[test]
    fn test_empty_text_fails_verification() {
        let claim = ClaimedIdentity::new("Edhem", "Hodzic", "2A141A80K");
        let verification = IdentityVerifier::new().verify("", &claim);
        assert!(!verification.result.success);
        assert_eq!(verification.extracted.confidence, 0.0);
    }

    #[test]
    fn test_strict_matcher() {
        let verifier = IdentityVerifier::with_parts(IdentityExtractor::new(), IdentityMatcher::strict());
        let claim = ClaimedIdentity::new("Edhem", "Hodzic", "2A141A80K");
        assert!(verifier.verify(CARD, &claim).result.success);
        let partial = ClaimedIdentity::new("Edh", "Hod", "2A141A80K");
        assert!(!verifier.verify(CARD, &partial).result.success);
    }

    #[test]
    fn test_verification_serializes() {
        let claim = ClaimedIdentity::new("Edhem", "Hodzic", "2A141A80K");
        let verification = IdentityVerifier::new().verify_bytes(CARD.as_bytes(), &claim).unwrap();
        let json = serde_json::to_value(&verification).unwrap();
        assert_eq!(json["result"]["success"], true);
        assert_eq!(json["extracted"]["idNumber"], "2A141A80K");
        assert_eq!(json["result"]["mismatches"], serde_json::json!([]));
    }
}
