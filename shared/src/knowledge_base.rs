//! Static remedy knowledge base
//!
//! Crop care, yield optimization and symptom remedy text keyed by closed
//! enums. Every lookup degrades to generic text for inputs outside the
//! tables; none of them can fail.

use crate::models::{CropType, GrowthStage, StressLevel, SymptomTag};

/// Crop-specific guidance for each stress bucket
#[derive(Debug, Clone, Copy)]
pub struct CropCare {
    pub healthy: &'static str,
    pub mild_stress: &'static str,
    pub severe_stress: &'static str,
    pub yield_info: &'static str,
    /// Preferred watering method, where the crop has one
    pub watering: Option<&'static str>,
    /// Known weakness worth mentioning to the grower
    pub sensitivity: Option<&'static str>,
}

/// Which care text applies to a stress level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressBucket {
    Healthy,
    MildStress,
    SevereStress,
}

impl StressBucket {
    /// Anything outside 0 and 1 is treated as severe
    pub fn from_level(level: i64) -> Self {
        match level {
            0 => StressBucket::Healthy,
            1 => StressBucket::MildStress,
            _ => StressBucket::SevereStress,
        }
    }

    fn level(&self) -> i64 {
        match self {
            StressBucket::Healthy => 0,
            StressBucket::MildStress => 1,
            StressBucket::SevereStress => 2,
        }
    }
}

impl From<StressLevel> for StressBucket {
    fn from(level: StressLevel) -> Self {
        StressBucket::from_level(i64::from(level.code()))
    }
}

/// Cause and treatment steps for one symptom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymptomRemedy {
    pub cause: &'static str,
    pub immediate: &'static str,
    pub follow_up: &'static str,
}

impl SymptomRemedy {
    /// True for the record returned for unknown symptom names
    pub fn is_empty(&self) -> bool {
        self.cause.is_empty() && self.immediate.is_empty() && self.follow_up.is_empty()
    }
}

pub const UNKNOWN_STRESS_LABEL: &str = "Unknown";
pub const UNKNOWN_STRESS_COLOR: &str = "#6b7280";
pub const NO_YIELD_DATA: &str = "No specific yield data available.";
pub const DEFAULT_WATERING: &str = "regular watering";
pub const UNDETERMINED_RECOMMENDATION: &str = "Unable to determine recommendation";

// ============================================================================
// Crop care tables
// ============================================================================

const TOMATO: CropCare = CropCare {
    healthy: "Your tomatoes are thriving! Keep soil consistently moist (2-3cm depth). Prune suckers weekly. Support with stakes as they grow.",
    mild_stress: "Tomatoes under mild stress. Increase watering to 5-6cm weekly. Apply mulch to retain moisture (5cm layer). Check for early blight on lower leaves.",
    severe_stress: "CRITICAL: Your tomatoes need immediate care! Deep water 8-10cm immediately. Apply fungicide for blight prevention. Remove affected leaves. Increase airflow.",
    yield_info: "Target: 20-30 tons/ha. Optimal temps: 21-27°C. Harvest when pink to extend ripeness. Use drip irrigation for 30% water savings.",
    watering: Some("drip irrigation"),
    sensitivity: Some("high to disease"),
};

const LETTUCE: CropCare = CropCare {
    healthy: "Lettuce growing well! Keep soil moist but not waterlogged. Provide afternoon shade in hot weather. Harvest outer leaves regularly.",
    mild_stress: "Lettuce stressed. Increase watering frequency (daily). Add shade cloth if temps >28°C. Check for aphids on new leaves.",
    severe_stress: "URGENT: Lettuce wilting! Water immediately and deeply. Provide 50% shade. Remove any bolting plants. Mist leaves in morning.",
    yield_info: "Target: 15-20 tons/ha. Optimal temps: 15-20°C. Bitter if temp >25°C. Succession plant every 2 weeks for continuous harvest.",
    watering: Some("frequent, light"),
    sensitivity: Some("bolts if hot"),
};

const CUCUMBER: CropCare = CropCare {
    healthy: "Cucumbers flourishing! Provide sturdy trellis support. Water 5cm weekly. Pinch main stem after 7-8 leaves to encourage lateral growth.",
    mild_stress: "Cucumber mildly stressed. Check for powdery mildew (white coating). Increase watering and airflow. Thin foliage if overcrowded.",
    severe_stress: "CRITICAL: Cucumbers drying! Water 10cm immediately. Spray with sulfur for mildew. Provide 50% shade cloth. Prune excess vines.",
    yield_info: "Target: 25-30 tons/ha. Optimal temps: 18-30°C. Pick every 2 days when 15-20cm (smaller = better quality). Daily picking increases yield.",
    watering: Some("consistent moisture"),
    sensitivity: Some("powdery mildew"),
};

const BASIL: CropCare = CropCare {
    healthy: "Basil is perfect! Pinch tops weekly to encourage bushiness. Keep soil consistently moist. Harvest before flowering for best flavor.",
    mild_stress: "Basil showing stress. Reduce watering (let topsoil dry between). Check for spider mites (fine webbing). Increase light exposure.",
    severe_stress: "URGENT: Basil dehydrating! Water immediately. Move to sunnier location (>6 hrs direct sun). Apply oil spray for mites.",
    yield_info: "Target: 3-4 harvests/season. Pinching increases yield by 40%. Optimal temps: 20-25°C. Freeze leaves in ice cubes for storage.",
    watering: Some("let topsoil dry"),
    sensitivity: Some("spider mites"),
};

const MINT: CropCare = CropCare {
    healthy: "Mint thriving! Very hardy - pinch regularly to control spread. Water moderately. Excellent for companion planting.",
    mild_stress: "Mint wilting slightly. Check soil drainage (mint prefers moist but well-drained). Reduce nitrogen fertilizer.",
    severe_stress: "CRITICAL: Mint dying! Water deeply. Check for root rot (musty smell). Improve drainage or repot. Trim dead foliage.",
    yield_info: "Target: 4-5 harvests/season. Very productive. Optimal temps: 15-25°C. Harvest before noon for maximum essential oil content.",
    watering: Some("moist not wet"),
    sensitivity: Some("root rot"),
};

const PEPPER: CropCare = CropCare {
    healthy: "Peppers doing great! Support with stakes. Water 5-6cm weekly. Blossom drop? Ensure consistent watering and 70F+ nights.",
    mild_stress: "Peppers under stress. Maintain consistent 70F+ night temps. Increase watering if soil dry >2cm. Check for spider mites.",
    severe_stress: "URGENT: Peppers failing! Water 8cm immediately. Protect from temps <55F (move inside/cover). Spray for pests.",
    yield_info: "Target: 8-12 tons/ha. Optimal temps: 25-30C day, 18-21C night. Harvest green or wait for color (15-20 days longer). Fruiting takes 60-90 days.",
    watering: Some("consistent"),
    sensitivity: Some("blossom drop"),
};

const CARROT: CropCare = CropCare {
    healthy: "Carrots developing well! Thin seedlings to 5cm apart at 4-week mark. Keep soil loose and moist. Avoid splitting with consistent moisture.",
    mild_stress: "Carrots stressed. Loosen soil if compacted (check depth to 30cm). Water 5cm weekly. Avoid excess nitrogen (causes forked roots).",
    severe_stress: "CRITICAL: Carrots stunted! Aerate soil deeply. Water 8cm. Test soil pH (prefer 6.0-6.8). May need 2-3 months total recovery.",
    yield_info: "Target: 20-30 tons/ha. Optimal temps: 15-20C. Harvest at 2-3cm diameter for best sweetness. Store at 1C for 6+ weeks.",
    watering: Some("moderate"),
    sensitivity: Some("root splitting"),
};

const WHEAT: CropCare = CropCare {
    healthy: "Wheat crop excellent! Monitor tiller formation (3-4 tillers optimal at tillering stage). Rainfall or irrigation: 500-750mm total.",
    mild_stress: "Wheat under stress. Check for diseases (leaf spot, rust). Ensure proper spacing for airflow. Fertilize if yellowing.",
    severe_stress: "URGENT: Wheat severely stressed! Apply fungicide if disease visible. Irrigate 5-6cm immediately. May need varieties replanting.",
    yield_info: "Target: 5-8 tons/ha. Optimal temps: 15-20C for growth, 10-15C for grain fill. Harvest when moisture <15%. 120-150 days to maturity.",
    watering: None,
    sensitivity: None,
};

const MAIZE: CropCare = CropCare {
    healthy: "Maize thriving! Monitor V-stage (visible leaf stage) weekly. Ensure uniform plant heights. Support with adequate fertilizer.",
    mild_stress: "Maize showing stress. Check for nitrogen deficiency (bottom leaves yellowing). Increase irrigation 5-6cm weekly.",
    severe_stress: "CRITICAL: Maize failing! Deep irrigation 8-10cm immediately. Fertilize with nitrogen. Check for root diseases.",
    yield_info: "Target: 8-12 tons/ha. Optimal temps: 25-30C day, 15-20C night. Harvest at physiological maturity (black dot at kernel base). 110-140 days.",
    watering: None,
    sensitivity: None,
};

const RICE: CropCare = CropCare {
    healthy: "Rice flooded and healthy! Maintain 5-7cm water depth. Watch for pest infestations (stemborers, leafhoppers). Optimal pH: 6.0-7.5.",
    mild_stress: "Rice under stress. Check water quality (maintain level). Watch for leaf spots or discoloration. Apply fungicide if needed.",
    severe_stress: "URGENT: Rice crop threatened! Drain and inspect roots (gray = root necrosis). Re-flood immediately. Apply pesticide if infested.",
    yield_info: "Target: 5-8 tons/ha (milled rice: 2.5-4 tons). Optimal temps: 25-30C. Harvest at 20% moisture. Store at <13% for longevity.",
    watering: None,
    sensitivity: None,
};

const COTTON: CropCare = CropCare {
    healthy: "Cotton bolls filling nicely! Maintain 60cm spacing. Monitor for insects (aphids, bollworms). Boll development: 50-60 days from flowering.",
    mild_stress: "Cotton under stress. Check for whiteflies (sticky residue). Increase water 5-6cm weekly. Monitor boll development.",
    severe_stress: "CRITICAL: Cotton failing! Water 8-10cm immediately. Apply insecticide for boll damage. Check for root rot.",
    yield_info: "Target: 1.5-2.5 tons/hectare lint. Optimal temps: 26-35C day (avoid <15C). Lint quality best when temperatures stable. Harvest at 40% boll opening.",
    watering: None,
    sensitivity: None,
};

const SUGARCANE: CropCare = CropCare {
    healthy: "Sugarcane stalks excellent! Optimal height: 2-2.5m. Provide adequate spacing (1m between rows). Monitor NPK ratios.",
    mild_stress: "Sugarcane stressed. Check for smut (black powder on shoots) - remove stalks. Water 5-6cm weekly. Reduce nitrogen if pests increase.",
    severe_stress: "URGENT: Sugarcane failing! Water 8-10cm immediately. Apply smut fungicide if infected. May need to replant sections.",
    yield_info: "Target: 50-80 tons/ha fresh stalks, 12-16 tons sugar/ha. Optimal temps: 22-30C. Crush when brix >12. Ratoon for 4-5 seasons.",
    watering: None,
    sensitivity: None,
};

const PULSES: CropCare = CropCare {
    healthy: "Pulse crops developing well! Monitor pod formation. Support with light staking. Nitrogen-fixing legumes - no extra N needed after inoculant.",
    mild_stress: "Pulses stressed. Check for wilting (overwatering). Reduce water frequency. Monitor for pod spot disease.",
    severe_stress: "CRITICAL: Pulses failing! Water 5-6cm if drought. Spray fungicide for disease. Thin crowded plants for airflow.",
    yield_info: "Target: 1.5-2.5 tons/ha. Optimal temps: 20-25C. Harvest when pods dry and rattle. Post-harvest: Store at <10% moisture.",
    watering: None,
    sensitivity: None,
};

/// Care table for a known crop
pub fn crop_care(crop: CropType) -> &'static CropCare {
    match crop {
        CropType::Tomato => &TOMATO,
        CropType::Lettuce => &LETTUCE,
        CropType::Cucumber => &CUCUMBER,
        CropType::Basil => &BASIL,
        CropType::Mint => &MINT,
        CropType::Pepper => &PEPPER,
        CropType::Carrot => &CARROT,
        CropType::Wheat => &WHEAT,
        CropType::Maize => &MAIZE,
        CropType::Rice => &RICE,
        CropType::Cotton => &COTTON,
        CropType::Sugarcane => &SUGARCANE,
        CropType::Pulses => &PULSES,
    }
}

// ============================================================================
// Lookups
// ============================================================================

/// Crop-agnostic advice for a stress level
pub fn general_recommendation(level: i64) -> &'static str {
    match level {
        0 => "✅ Your crop looks healthy! Continue regular maintenance and monitor soil moisture.",
        1 => "⚠️ Mild stress detected. Increase irrigation by 15%. Check for pests. Monitor growth closely.",
        2 => "🚨 SEVERE STRESS! Urgent action: Increase irrigation by 40%, apply treatments, monitor closely.",
        _ => UNDETERMINED_RECOMMENDATION,
    }
}

/// Crop-specific care text, or the generic bucket message for unknown crops
pub fn care_advice(level: impl Into<StressBucket>, crop_type: &str) -> &'static str {
    let bucket = level.into();
    match CropType::parse(crop_type) {
        Some(crop) => {
            let care = crop_care(crop);
            match bucket {
                StressBucket::Healthy => care.healthy,
                StressBucket::MildStress => care.mild_stress,
                StressBucket::SevereStress => care.severe_stress,
            }
        }
        None => general_recommendation(bucket.level()),
    }
}

pub fn yield_info(crop_type: &str) -> &'static str {
    CropType::parse(crop_type)
        .map(|crop| crop_care(crop).yield_info)
        .unwrap_or(NO_YIELD_DATA)
}

pub fn watering_method(crop_type: &str) -> &'static str {
    CropType::parse(crop_type)
        .and_then(|crop| crop_care(crop).watering)
        .unwrap_or(DEFAULT_WATERING)
}

pub fn crop_sensitivity(crop_type: &str) -> Option<&'static str> {
    CropType::parse(crop_type).and_then(|crop| crop_care(crop).sensitivity)
}

pub fn stress_label(level: i64) -> &'static str {
    StressLevel::from_code(level)
        .map(|l| l.label())
        .unwrap_or(UNKNOWN_STRESS_LABEL)
}

pub fn stress_color(level: i64) -> &'static str {
    StressLevel::from_code(level)
        .map(|l| l.color())
        .unwrap_or(UNKNOWN_STRESS_COLOR)
}

/// Universal treatment for a symptom
pub fn symptom_remedy(tag: SymptomTag) -> SymptomRemedy {
    match tag {
        SymptomTag::Wilting => SymptomRemedy {
            cause: "Inadequate soil moisture or root stress",
            immediate: "1. Water deeply (5-8cm) immediately to reach root zone. 2. Apply mulch (5cm) to reduce evaporation.",
            follow_up: "3. Check soil moisture daily. 4. Prune affected leaves to reduce water demand.",
        },
        SymptomTag::Yellowing => SymptomRemedy {
            cause: "Nitrogen deficiency, waterlogging, or nutrient lockout",
            immediate: "1. Apply nitrogen-rich fertilizer (urea or compost tea). 2. Check drainage - ensure no waterlogging.",
            follow_up: "3. Apply foliar spray (Neem oil or compost extract). 4. Improve soil aeration by reducing compaction.",
        },
        SymptomTag::Spotting => SymptomRemedy {
            cause: "Fungal or bacterial disease",
            immediate: "1. Remove and destroy affected leaves immediately. 2. Improve air circulation by pruning dense foliage.",
            follow_up: "3. Apply sulfur or copper fungicide every 7 days. 4. Avoid overhead watering - water at soil level only.",
        },
        SymptomTag::Pests => SymptomRemedy {
            cause: "Insect infestation",
            immediate: "1. Inspect both leaf surfaces for pest presence. 2. Spray with organic insecticide (neem oil, soap spray).",
            follow_up: "3. Apply spinosad or pyrethrin if organic fails. 4. Release beneficial insects (ladybugs, parasitic wasps).",
        },
        SymptomTag::Disease => SymptomRemedy {
            cause: "Fungal, bacterial, or viral infection",
            immediate: "1. Isolate affected plant if possible. 2. Remove all diseased parts (sanitize tools between cuts).",
            follow_up: "3. Apply appropriate fungicide or bactericide. 4. Improve sanitation - clean leaves with 70% alcohol.",
        },
        SymptomTag::Dry => SymptomRemedy {
            cause: "Severe dehydration or high transpiration",
            immediate: "1. Water deeply immediately (8-10cm). 2. Provide shade cloth (30-50%) to reduce heat stress.",
            follow_up: "3. Mist leaves early morning to reduce heat. 4. Add organic matter to soil to improve water retention.",
        },
        SymptomTag::Stunting => SymptomRemedy {
            cause: "Nutrient deficiency, disease, or environmental stress",
            immediate: "1. Apply balanced fertilizer (NPK 10-10-10). 2. Ensure proper lighting (6+ hours direct sun).",
            follow_up: "3. Check for root diseases (musty smell = root rot). 4. Optimize temperature for growth stage.",
        },
    }
}

/// Remedy by symptom name; an empty record for names outside the tag set
pub fn symptom_remedy_by_name(name: &str) -> SymptomRemedy {
    SymptomTag::parse(name)
        .map(symptom_remedy)
        .unwrap_or_default()
}

/// Heuristic soil moisture (%) from current weather, clamped to 10-80
pub fn estimate_soil_moisture(rainfall: f64, humidity: f64, temperature: f64) -> f64 {
    let base_moisture = 40.0;
    let from_rainfall = (rainfall * 5.0).min(20.0);
    let from_humidity = (humidity - 50.0) * 0.3;
    let from_temp = (5.0 - (temperature - 25.0) * 0.2).max(0.0);

    (base_moisture + from_rainfall + from_humidity + from_temp).clamp(10.0, 80.0)
}

pub fn crop_types() -> Vec<&'static str> {
    CropType::ALL.iter().map(|c| c.as_str()).collect()
}

pub fn growth_stages() -> Vec<&'static str> {
    GrowthStage::ALL.iter().map(|s| s.as_str()).collect()
}
