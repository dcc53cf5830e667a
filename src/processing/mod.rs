pub mod classifier;
pub mod dates;
pub mod extractors;
pub mod labels;
pub mod names;
pub mod scanner;
pub mod script;

pub use classifier::DocumentClassifier;
pub use extractors::{BosnianIdExtractor, ExtractorRegistry, FieldExtractor, GenericExtractor};
pub use labels::{LabelHit, LabelMatcher};
pub use scanner::{CandidateScanner, CandidateValidator, FieldRule};
pub use script::ScriptNormalizer;
