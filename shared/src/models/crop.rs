//! Crop and growth stage models

use serde::{Deserialize, Serialize};

/// Crops the advisory knowledge base has specific guidance for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    // Home/garden crops
    Tomato,
    Lettuce,
    Cucumber,
    Basil,
    Mint,
    Pepper,
    Carrot,
    // Field crops
    Wheat,
    Maize,
    Rice,
    Cotton,
    Sugarcane,
    Pulses,
}

impl CropType {
    pub const ALL: [CropType; 13] = [
        CropType::Tomato,
        CropType::Lettuce,
        CropType::Cucumber,
        CropType::Basil,
        CropType::Mint,
        CropType::Pepper,
        CropType::Carrot,
        CropType::Wheat,
        CropType::Maize,
        CropType::Rice,
        CropType::Cotton,
        CropType::Sugarcane,
        CropType::Pulses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Tomato => "tomato",
            CropType::Lettuce => "lettuce",
            CropType::Cucumber => "cucumber",
            CropType::Basil => "basil",
            CropType::Mint => "mint",
            CropType::Pepper => "pepper",
            CropType::Carrot => "carrot",
            CropType::Wheat => "wheat",
            CropType::Maize => "maize",
            CropType::Rice => "rice",
            CropType::Cotton => "cotton",
            CropType::Sugarcane => "sugarcane",
            CropType::Pulses => "pulses",
        }
    }

    /// Case-insensitive lookup; `None` for crops outside the knowledge base
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = normalize_category(value);
        Self::ALL
            .iter()
            .copied()
            .find(|crop| crop.as_str() == normalized)
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop growth stages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Early leaf growth
    Vegetative,
    /// Flower/bud formation
    Flowering,
    /// Fruit/pod development
    Fruiting,
    /// Grain maturation (cereals)
    GrainFill,
    Mature,
    /// Pod filling (legumes)
    PodFill,
    /// Boll formation (cotton)
    BollFormation,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 7] = [
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Fruiting,
        GrowthStage::GrainFill,
        GrowthStage::Mature,
        GrowthStage::PodFill,
        GrowthStage::BollFormation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Fruiting => "fruiting",
            GrowthStage::GrainFill => "grain_fill",
            GrowthStage::Mature => "mature",
            GrowthStage::PodFill => "pod_fill",
            GrowthStage::BollFormation => "boll_formation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = normalize_category(value);
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == normalized)
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop metadata for one advisory request.
///
/// Both fields are lower-cased on construction. Values outside the known
/// enumerations are kept verbatim so lookups can degrade to generic text
/// instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropContext {
    pub crop_type: String,
    pub growth_stage: String,
}

impl CropContext {
    pub fn new(crop_type: &str, growth_stage: &str) -> Self {
        Self {
            crop_type: normalize_category(crop_type),
            growth_stage: normalize_category(growth_stage),
        }
    }

    pub fn crop(&self) -> Option<CropType> {
        CropType::parse(&self.crop_type)
    }

    pub fn stage(&self) -> Option<GrowthStage> {
        GrowthStage::parse(&self.growth_stage)
    }
}

/// Normalize a categorical input before any lookup
pub fn normalize_category(value: &str) -> String {
    value.trim().to_lowercase()
}
