//! Keyword-based symptom extraction from free-text field observations

use std::collections::BTreeSet;

use crate::models::SymptomTag;

/// Trigger phrases per tag. Matching is plain substring search on the
/// lower-cased text, so "yellow" also matches "yellowish".
const SYMPTOM_TRIGGERS: [(SymptomTag, &[&str]); 7] = [
    (SymptomTag::Wilting, &["wilting", "drooping", "droopy", "slump"]),
    (SymptomTag::Yellowing, &["yellow", "yellowing", "pale", "chlorotic"]),
    (SymptomTag::Spotting, &["spot", "spots", "lesion", "necrotic", "blight"]),
    (
        SymptomTag::Pests,
        &["insect", "pest", "bug", "mite", "aphid", "caterpillar", "webbing"],
    ),
    (
        SymptomTag::Disease,
        &["disease", "mold", "fungal", "powder", "rust", "blight", "scab"],
    ),
    (
        SymptomTag::Dry,
        &["drying", "dry", "crispy", "brown edges", "burnt"],
    ),
    (SymptomTag::Stunting, &["stunted", "slow growth", "weak", "small"]),
];

/// Map observation text to the set of symptom tags it mentions.
///
/// Absent or empty text yields the empty set.
pub fn extract_symptoms(text: Option<&str>) -> BTreeSet<SymptomTag> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return BTreeSet::new();
    };

    let lowered = text.to_lowercase();
    SYMPTOM_TRIGGERS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|phrase| lowered.contains(phrase)))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Trigger phrases that map to `tag`
pub fn trigger_phrases(tag: SymptomTag) -> &'static [&'static str] {
    SYMPTOM_TRIGGERS
        .iter()
        .find(|(candidate, _)| *candidate == tag)
        .map(|(_, triggers)| *triggers)
        .unwrap_or(&[])
}
