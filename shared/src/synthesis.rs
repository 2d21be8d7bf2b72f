//! Advisory synthesis
//!
//! Combines the classifier's stress level with the symptoms extracted from
//! field notes into a structured advisory. Pure composition over validated
//! inputs; there are no error paths.

use std::collections::BTreeSet;

use crate::knowledge_base::{care_advice, symptom_remedy, watering_method};
use crate::models::{Advisory, StressLevel, SymptomAnalysisEntry, SymptomTag};

pub const URGENT_PHRASE: &str = "URGENT ACTION NEEDED!";
pub const MONITORING_PHRASE: &str = "Monitoring recommended";
pub const PREVENTIVE_PHRASE: &str = "Preventive care suggested";

/// Urgency wording for the combined assessment.
///
/// Urgent wording needs a severe classification corroborated by at least one
/// reported symptom; severe without symptoms falls through to preventive.
pub fn urgency_phrase(stress_level: StressLevel, has_symptoms: bool) -> &'static str {
    match stress_level {
        StressLevel::SevereStress if has_symptoms => URGENT_PHRASE,
        StressLevel::MildStress => MONITORING_PHRASE,
        _ => PREVENTIVE_PHRASE,
    }
}

/// Build the advisory for one report
pub fn synthesize(
    crop_type: &str,
    stress_level: StressLevel,
    observed_symptoms: &BTreeSet<SymptomTag>,
    temperature: f64,
    humidity: f64,
    growth_stage: &str,
) -> Advisory {
    let label = stress_level.label().to_lowercase();

    if observed_symptoms.is_empty() {
        // Classification only; never invent symptoms
        return Advisory {
            observed_symptoms: BTreeSet::new(),
            symptom_analysis: Vec::new(),
            combined_assessment: format!(
                "Your {} shows {} based on current conditions (Temp: {}°C, Humidity: {}%). {}",
                crop_type,
                label,
                temperature,
                humidity,
                care_advice(stress_level, crop_type)
            ),
            action_priority: Vec::new(),
        };
    }

    let is_urgent = stress_level.is_severe();
    let mut symptom_analysis = Vec::with_capacity(observed_symptoms.len());
    let mut action_priority = Vec::new();

    for &symptom in observed_symptoms {
        let remedy = symptom_remedy(symptom);
        symptom_analysis.push(SymptomAnalysisEntry {
            symptom,
            cause: remedy.cause.to_string(),
            immediate_actions: remedy.immediate.to_string(),
            follow_up: remedy.follow_up.to_string(),
            is_urgent,
        });
        if is_urgent {
            action_priority.push(symptom);
        }
    }

    let combined_assessment = format!(
        "{} - Your {} ({}) has {} observed issue(s). Current conditions (Temp: {}°C, Humidity: {}%) \
         combined with reported symptoms suggest {}. Recommended approach: Use {} and closely \
         monitor over next 48 hours.",
        urgency_phrase(stress_level, true),
        crop_type,
        growth_stage,
        observed_symptoms.len(),
        temperature,
        humidity,
        label,
        watering_method(crop_type)
    );

    Advisory {
        observed_symptoms: observed_symptoms.clone(),
        symptom_analysis,
        combined_assessment,
        action_priority,
    }
}
