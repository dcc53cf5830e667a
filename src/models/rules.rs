use lazy_static::lazy_static;

use crate::models::{DocumentProfile, ExtractionOptions, Script};
use crate::processing::script::ScriptNormalizer;

/// A printed field label in one script.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub script: Script,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    pub fn new(latin: &[&str], cyrillic: &[&str]) -> Self {
        let mut labels = Vec::with_capacity(latin.len() + cyrillic.len());
        labels.extend(latin.iter().map(|text| Label {
            text: text.to_string(),
            script: Script::Latin,
        }));
        labels.extend(cyrillic.iter().map(|text| Label {
            text: text.to_string(),
            script: Script::Cyrillic,
        }));
        LabelSet { labels }
    }

    /// Builds a set from caller-supplied labels, tagging each one with the
    /// script it is written in.
    pub fn from_overrides(labels: &[String]) -> Self {
        LabelSet {
            labels: labels
                .iter()
                .map(|text| text.trim())
                .filter(|text| !text.is_empty())
                .map(|text| Label {
                    text: text.to_string(),
                    script: ScriptNormalizer::detect_script(text),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn union(&self, other: &LabelSet) -> LabelSet {
        let mut labels = self.labels.clone();
        labels.extend(other.labels.iter().filter(|label| !self.labels.contains(label)).cloned());
        LabelSet { labels }
    }
}

/// Static label and noise configuration of one card layout.
#[derive(Debug, Clone)]
pub struct ProfileRules {
    pub profile: DocumentProfile,
    /// Text markers identifying the layout; first registered match wins.
    pub signatures: Vec<&'static str>,
    /// Tokens that never belong to a field value (country name, card title).
    pub noise_tokens: Vec<&'static str>,
    /// Printed labels of fields this crate does not extract.
    pub other_labels: Vec<&'static str>,
    pub first_name: LabelSet,
    pub last_name: LabelSet,
    pub full_name: LabelSet,
    pub id_number: LabelSet,
    pub date_of_birth: LabelSet,
    pub address: LabelSet,
    pub signature: LabelSet,
}

impl ProfileRules {
    pub fn for_profile(profile: DocumentProfile) -> &'static ProfileRules {
        match profile {
            DocumentProfile::Generic => &GENERIC_RULES,
            DocumentProfile::BosnianNationalId => &BOSNIAN_RULES,
        }
    }

    /// Copy of these rules with the caller's label overrides applied.
    pub fn with_options(&self, options: &ExtractionOptions) -> ProfileRules {
        let mut rules = self.clone();
        if let Some(labels) = &options.first_name_labels {
            rules.first_name = LabelSet::from_overrides(labels);
        }
        if let Some(labels) = &options.last_name_labels {
            rules.last_name = LabelSet::from_overrides(labels);
        }
        if let Some(labels) = &options.id_number_labels {
            rules.id_number = LabelSet::from_overrides(labels);
        }
        if let Some(labels) = &options.date_of_birth_labels {
            rules.date_of_birth = LabelSet::from_overrides(labels);
        }
        if let Some(labels) = &options.address_labels {
            rules.address = LabelSet::from_overrides(labels);
        }
        rules
    }

    /// Every label printed on the card, in any script.
    pub fn printed_labels(&self) -> Vec<String> {
        let sets = [
            &self.first_name,
            &self.last_name,
            &self.full_name,
            &self.id_number,
            &self.date_of_birth,
            &self.address,
            &self.signature,
        ];
        let mut labels: Vec<String> = sets
            .iter()
            .flat_map(|set| set.texts())
            .chain(self.other_labels.iter().copied())
            .map(|text| text.to_string())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Tokens a candidate value region must not contain.
    pub fn excluded_tokens(&self) -> Vec<String> {
        let mut tokens = self.printed_labels();
        tokens.extend(self.noise_tokens.iter().map(|token| token.to_string()));
        tokens
    }
}

lazy_static! {
    static ref BOSNIAN_RULES: ProfileRules = ProfileRules {
        profile: DocumentProfile::BosnianNationalId,
        signatures: vec![
            "BOSNA I HERCEGOVINA",
            "BOSNIA AND HERZEGOVINA",
            "БОСНА И ХЕРЦЕГОВИНА",
            "LIČNA KARTA",
            "LICNA KARTA",
            "OSOBNA ISKAZNICA",
            "ЛИЧНА КАРТА",
            "SERIJSKI BROJ",
            "СЕРИЈСКИ БРОЈ",
            "PREZIME",
            "ПРЕЗИМЕ",
        ],
        noise_tokens: vec![
            "BOSNA I HERCEGOVINA",
            "BOSNIA AND HERZEGOVINA",
            "БОСНА И ХЕРЦЕГОВИНА",
            "LIČNA KARTA",
            "LICNA KARTA",
            "OSOBNA ISKAZNICA",
            "ЛИЧНА КАРТА",
            "IDENTITY CARD",
            "BIH",
            "БИХ",
            "REPUBLIKA",
            "FEDERACIJA",
            "MUP",
        ],
        other_labels: vec![
            "SPOL",
            "POL",
            "SEX",
            "ПОЛ",
            "DRŽAVLJANSTVO",
            "DRZAVLJANSTVO",
            "NATIONALITY",
            "ДРЖАВЉАНСТВО",
            "DATUM IZDAVANJA",
            "DATE OF ISSUE",
            "DATUM ISTEKA",
            "DATE OF EXPIRY",
            "IZDAO",
            "ISSUED BY",
            "JMB",
            "ЈМБ",
        ],
        first_name: LabelSet::new(&["IME", "GIVEN NAME", "GIVEN NAMES"], &["ИМЕ"]),
        last_name: LabelSet::new(&["PREZIME", "SURNAME"], &["ПРЕЗИМЕ"]),
        full_name: LabelSet::default(),
        id_number: LabelSet::new(&["SERIJSKI BROJ", "SERIAL NUMBER"], &["СЕРИЈСКИ БРОЈ"]),
        date_of_birth: LabelSet::new(
            &["DATUM ROĐENJA", "DATUM RODJENJA", "DATUM RODENJA", "DATE OF BIRTH"],
            &["ДАТУМ РОЂЕЊА"],
        ),
        address: LabelSet::new(&["PREBIVALIŠTE", "PREBIVALISTE", "ADRESA", "ADDRESS"], &["ПРЕБИВАЛИШТЕ"]),
        signature: LabelSet::new(&["POTPIS", "SIGNATURE"], &["ПОТПИС"]),
    };

    static ref GENERIC_RULES: ProfileRules = ProfileRules {
        profile: DocumentProfile::Generic,
        signatures: Vec::new(),
        noise_tokens: vec![
            "IDENTITY CARD",
            "NATIONAL ID",
            "ID CARD",
            "REPUBLIC",
            "KINGDOM",
            "PASSPORT",
            "DRIVING LICENCE",
            "DRIVER LICENSE",
        ],
        other_labels: vec![
            "SEX",
            "GENDER",
            "NATIONALITY",
            "DATE OF ISSUE",
            "DATE OF EXPIRY",
            "EXPIRY",
            "ISSUED BY",
            "AUTHORITY",
        ],
        first_name: LabelSet::new(&["GIVEN NAMES", "GIVEN NAME", "FIRST NAME", "FORENAMES", "FORENAME"], &[]),
        last_name: LabelSet::new(&["SURNAME", "LAST NAME", "FAMILY NAME"], &[]),
        full_name: LabelSet::new(&["FULL NAME", "NAME"], &[]),
        id_number: LabelSet::new(
            &["ID NUMBER", "ID NO", "DOCUMENT NUMBER", "DOCUMENT NO", "CARD NUMBER", "CARD NO", "PERSONAL NO"],
            &[],
        ),
        date_of_birth: LabelSet::new(&["DATE OF BIRTH", "BIRTH DATE", "DOB", "BORN"], &[]),
        address: LabelSet::new(&["ADDRESS", "RESIDENCE"], &[]),
        signature: LabelSet::new(&["SIGNATURE"], &[]),
    };
}
