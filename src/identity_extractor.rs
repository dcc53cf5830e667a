use log::{debug, info, warn};

use crate::models::*;
use crate::processing::*;
use crate::utils::IdScanError;
use crate::validation::ConfidenceAggregator;

/// Turns raw OCR text into an `ExtractedIdentity`: classify the layout, run
/// the registered strategy, aggregate the field confidences.
pub struct IdentityExtractor {
    registry: ExtractorRegistry,
    options: ExtractionOptions,
}

impl IdentityExtractor {
    pub fn new() -> Self {
        Self::with_options(ExtractionOptions::default())
    }

    pub fn with_options(options: ExtractionOptions) -> Self {
        Self::with_registry(ExtractorRegistry::with_defaults(), options)
    }

    pub fn with_registry(registry: ExtractorRegistry, options: ExtractionOptions) -> Self {
        IdentityExtractor { registry, options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Never fails: sparse or noisy text yields absent fields and a low
    /// confidence, empty text an all-absent identity.
    pub fn extract(&self, raw_text: &str) -> ExtractedIdentity {
        if raw_text.trim().is_empty() {
            info!("no text detected in OCR output");
            return ExtractedIdentity::empty();
        }

        let profile = self.registry.classify(raw_text);
        match self.registry.get(profile) {
            Ok(extractor) => self.run(extractor, raw_text),
            Err(e) => {
                warn!("no extractor for classified profile: {}", e);
                ExtractedIdentity::empty()
            }
        }
    }

    /// Extracts with a caller-chosen profile instead of classifying the text.
    pub fn extract_as(&self, raw_text: &str, profile: DocumentProfile) -> Result<ExtractedIdentity, IdScanError> {
        let extractor = self.registry.get(profile)?;
        if raw_text.trim().is_empty() {
            info!("no text detected in OCR output");
            return Ok(ExtractedIdentity::empty());
        }
        Ok(self.run(extractor, raw_text))
    }

    /// Entry point for OCR output that arrives as bytes. Anything that is
    /// not UTF-8 text is a caller error.
    pub fn extract_bytes(&self, raw: &[u8]) -> Result<ExtractedIdentity, IdScanError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| IdScanError::InvalidInput(format!("OCR output is not UTF-8 text: {}", e)))?;
        Ok(self.extract(text))
    }

    fn run(&self, extractor: &dyn FieldExtractor, raw_text: &str) -> ExtractedIdentity {
        if self.options.extract_address {
            info!("address extraction is disabled; ignoring extractAddress");
        }

        let profile = extractor.profile();
        let rules = extractor.rules().with_options(&self.options);
        let script = ScriptNormalizer::detect_script(raw_text);
        let lines: Vec<&str> = raw_text.lines().map(str::trim).collect();

        let fields = extractor.extract(&lines, &rules, &self.options);
        let confidence = ConfidenceAggregator::aggregate(&fields.confidences());
        debug!("{:?} extraction from {} lines, confidence {:.2}", profile, lines.len(), confidence);

        ExtractedIdentity::from_fields(profile, script, fields, confidence)
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}
