use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Card layout a block of OCR text was recognised as. Each variant has one
/// extraction strategy registered in the `ExtractorRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentProfile {
    Generic,
    BosnianNationalId,
}

impl DocumentProfile {
    /// ISO 3166-1 alpha-3 code of the issuing country, `UNKNOWN` when the
    /// layout was not recognised.
    pub fn country_code(&self) -> &'static str {
        match self {
            DocumentProfile::Generic => "UNKNOWN",
            DocumentProfile::BosnianNationalId => "BIH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Cyrillic,
}

/// Heuristic reliability score of one extraction method, always in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f32);

impl Confidence {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Confidence(0.0);
        }
        Confidence(value.max(0.0).min(1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// A field value together with the confidence of the method that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub value: T,
    pub confidence: Confidence,
}

impl<T> Scored<T> {
    pub fn new(value: T, confidence: f32) -> Self {
        Scored {
            value,
            confidence: Confidence::new(confidence),
        }
    }
}

/// Unconfirmed extraction result. Lower `priority` wins; ties go to the
/// higher `match_ratio`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCandidate {
    pub value: String,
    pub priority: u8,
    pub match_ratio: f32,
}

/// Fields found by one profile strategy, before aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub id_number: Option<Scored<String>>,
    pub first_name: Option<Scored<String>>,
    pub last_name: Option<Scored<String>>,
    pub full_name: Option<Scored<String>>,
    pub date_of_birth: Option<Scored<String>>,
}

impl ExtractedFields {
    /// Confidence of every field slot; derived values never carry one.
    pub fn confidences(&self) -> [Option<Confidence>; 5] {
        [
            self.id_number.as_ref().map(|f| f.confidence),
            self.first_name.as_ref().map(|f| f.confidence),
            self.last_name.as_ref().map(|f| f.confidence),
            self.full_name.as_ref().map(|f| f.confidence),
            self.date_of_birth.as_ref().map(|f| f.confidence),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIdentity {
    pub id_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub document_country: String,
    pub profile: DocumentProfile,
    pub script: Script,
    pub confidence: f32,
}

impl ExtractedIdentity {
    /// Identity with every field absent, used when no text was detected.
    pub fn empty() -> Self {
        ExtractedIdentity {
            id_number: None,
            first_name: None,
            last_name: None,
            full_name: None,
            date_of_birth: None,
            document_country: DocumentProfile::Generic.country_code().to_string(),
            profile: DocumentProfile::Generic,
            script: Script::Latin,
            confidence: 0.0,
        }
    }

    pub fn from_fields(
        profile: DocumentProfile,
        script: Script,
        fields: ExtractedFields,
        confidence: f32,
    ) -> Self {
        let first_name = fields.first_name.map(|f| f.value);
        let last_name = fields.last_name.map(|f| f.value);
        let full_name = match (&first_name, &last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => fields.full_name.map(|f| f.value),
        };

        ExtractedIdentity {
            id_number: fields.id_number.map(|f| f.value),
            first_name,
            last_name,
            full_name,
            date_of_birth: fields.date_of_birth.map(|f| f.value),
            document_country: profile.country_code().to_string(),
            profile,
            script,
            confidence,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id_number.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.full_name.is_none()
            && self.date_of_birth.is_none()
    }
}

/// Identity typed in by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedIdentity {
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
}

impl ClaimedIdentity {
    pub fn new(first_name: &str, last_name: &str, id_number: &str) -> Self {
        ClaimedIdentity {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            id_number: id_number.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchField {
    FirstName,
    LastName,
    IdNumber,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub success: bool,
    pub id_match: bool,
    pub name_match: bool,
    pub mismatches: BTreeSet<MismatchField>,
    pub message: String,
}
