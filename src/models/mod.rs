pub mod data;
pub mod options;
pub mod rules;

pub use data::*;
pub use options::ExtractionOptions;
pub use rules::{Label, LabelSet, ProfileRules};
