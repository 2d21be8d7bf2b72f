//! Crop stress classification levels

use serde::{Deserialize, Serialize};

/// Discrete crop-health classification, serialized as its integer code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum StressLevel {
    Healthy,
    MildStress,
    SevereStress,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [
        StressLevel::Healthy,
        StressLevel::MildStress,
        StressLevel::SevereStress,
    ];

    pub fn code(&self) -> u8 {
        match self {
            StressLevel::Healthy => 0,
            StressLevel::MildStress => 1,
            StressLevel::SevereStress => 2,
        }
    }

    /// Map a raw class index to a level; `None` outside `0..=2`
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(StressLevel::Healthy),
            1 => Some(StressLevel::MildStress),
            2 => Some(StressLevel::SevereStress),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StressLevel::Healthy => "Healthy",
            StressLevel::MildStress => "Mild Stress",
            StressLevel::SevereStress => "Severe Stress",
        }
    }

    /// Hex colour used by dashboards
    pub fn color(&self) -> &'static str {
        match self {
            StressLevel::Healthy => "#22c55e",
            StressLevel::MildStress => "#eab308",
            StressLevel::SevereStress => "#ef4444",
        }
    }

    pub fn is_severe(&self) -> bool {
        matches!(self, StressLevel::SevereStress)
    }
}

impl From<StressLevel> for u8 {
    fn from(level: StressLevel) -> Self {
        level.code()
    }
}

impl TryFrom<u8> for StressLevel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        StressLevel::from_code(i64::from(code))
            .ok_or_else(|| format!("stress level must be 0, 1 or 2, got {}", code))
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
