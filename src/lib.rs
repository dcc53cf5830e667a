pub mod identity_extractor;
pub mod identity_verifier;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use identity_extractor::IdentityExtractor;
pub use identity_verifier::{IdentityVerifier, Verification};
pub use models::{ClaimedIdentity, DocumentProfile, ExtractedIdentity, ExtractionOptions, MatchResult};
pub use utils::IdScanError;
