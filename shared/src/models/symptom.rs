//! Symptom tags detected in field observations

use serde::{Deserialize, Serialize};

/// Canonical label for a textually-detected crop issue.
///
/// The derived `Ord` follows declaration order, which gives sets of tags a
/// stable iteration order for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymptomTag {
    Wilting,
    Yellowing,
    Spotting,
    Pests,
    Disease,
    Dry,
    Stunting,
}

impl SymptomTag {
    pub const ALL: [SymptomTag; 7] = [
        SymptomTag::Wilting,
        SymptomTag::Yellowing,
        SymptomTag::Spotting,
        SymptomTag::Pests,
        SymptomTag::Disease,
        SymptomTag::Dry,
        SymptomTag::Stunting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomTag::Wilting => "wilting",
            SymptomTag::Yellowing => "yellowing",
            SymptomTag::Spotting => "spotting",
            SymptomTag::Pests => "pests",
            SymptomTag::Disease => "disease",
            SymptomTag::Dry => "dry",
            SymptomTag::Stunting => "stunting",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == normalized)
    }
}

impl std::fmt::Display for SymptomTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
