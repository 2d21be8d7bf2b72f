//! Advisory models produced by the synthesis pipeline

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::SymptomTag;

/// Remedy guidance for one observed symptom
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomAnalysisEntry {
    pub symptom: SymptomTag,
    pub cause: String,
    pub immediate_actions: String,
    pub follow_up: String,
    /// Set from the stress level at synthesis time, not from the symptom
    pub is_urgent: bool,
}

/// Structured recommendation built fresh for each request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advisory {
    pub observed_symptoms: BTreeSet<SymptomTag>,
    pub symptom_analysis: Vec<SymptomAnalysisEntry>,
    pub combined_assessment: String,
    pub action_priority: Vec<SymptomTag>,
}

impl Advisory {
    pub fn has_urgent_actions(&self) -> bool {
        !self.action_priority.is_empty()
    }
}

/// Outcome of the AI augmentation chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AiNarrative {
    Generated { provider: String, text: String },
    Unavailable,
}

impl AiNarrative {
    pub fn text(&self) -> Option<&str> {
        match self {
            AiNarrative::Generated { text, .. } => Some(text),
            AiNarrative::Unavailable => None,
        }
    }

    pub fn provider(&self) -> Option<&str> {
        match self {
            AiNarrative::Generated { provider, .. } => Some(provider),
            AiNarrative::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AiNarrative::Generated { .. })
    }
}
