pub mod confidence;
pub mod identity;

pub use confidence::ConfidenceAggregator;
pub use identity::{IdentityMatcher, NameComparison};
