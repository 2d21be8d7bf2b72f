//! Tests for the remedy knowledge base
//! Verifies label/colour totality, generic fallbacks and lookup purity

use proptest::prelude::*;
use shared::{
    care_advice, crop_care, crop_sensitivity, crop_types, estimate_soil_moisture,
    general_recommendation, growth_stages, stress_color, stress_label, symptom_remedy,
    symptom_remedy_by_name, watering_method, yield_info, CropType, StressBucket, StressLevel,
    SymptomTag, DEFAULT_WATERING, NO_YIELD_DATA, UNDETERMINED_RECOMMENDATION,
    UNKNOWN_STRESS_COLOR, UNKNOWN_STRESS_LABEL,
};

// =============================================================================
// Stress labels and colours
// =============================================================================

mod labels_and_colors {
    use super::*;

    #[test]
    fn known_levels() {
        assert_eq!(stress_label(0), "Healthy");
        assert_eq!(stress_label(1), "Mild Stress");
        assert_eq!(stress_label(2), "Severe Stress");
        assert_eq!(stress_color(0), "#22c55e");
        assert_eq!(stress_color(1), "#eab308");
        assert_eq!(stress_color(2), "#ef4444");
    }

    #[test]
    fn unknown_levels_fall_back() {
        for level in [-1, 3, 42, i64::MIN, i64::MAX] {
            assert_eq!(stress_label(level), UNKNOWN_STRESS_LABEL);
            assert_eq!(stress_color(level), UNKNOWN_STRESS_COLOR);
        }
    }

    proptest! {
        /// Every integer maps to a non-empty label and colour
        #[test]
        fn prop_label_and_color_are_total(level in any::<i64>()) {
            prop_assert!(!stress_label(level).is_empty());
            prop_assert!(stress_color(level).starts_with('#'));
        }
    }
}

// =============================================================================
// Crop care and yield
// =============================================================================

mod crop_guidance {
    use super::*;

    #[test]
    fn every_crop_has_complete_guidance() {
        for crop in CropType::ALL {
            let care = crop_care(crop);
            assert!(!care.healthy.is_empty(), "{}", crop);
            assert!(!care.mild_stress.is_empty(), "{}", crop);
            assert!(!care.severe_stress.is_empty(), "{}", crop);
            assert!(!care.yield_info.is_empty(), "{}", crop);
            assert_ne!(yield_info(crop.as_str()), NO_YIELD_DATA);
        }
    }

    #[test]
    fn care_advice_selects_bucket() {
        let care = crop_care(CropType::Tomato);
        assert_eq!(care_advice(StressLevel::Healthy, "tomato"), care.healthy);
        assert_eq!(care_advice(StressLevel::MildStress, "tomato"), care.mild_stress);
        assert_eq!(care_advice(StressLevel::SevereStress, "tomato"), care.severe_stress);
    }

    #[test]
    fn out_of_range_levels_use_severe_text() {
        let care = crop_care(CropType::Wheat);
        assert_eq!(care_advice(StressBucket::from_level(7), "wheat"), care.severe_stress);
        assert_eq!(care_advice(StressBucket::from_level(-3), "wheat"), care.severe_stress);
    }

    #[test]
    fn unknown_crop_gets_generic_text() {
        assert_eq!(
            care_advice(StressLevel::MildStress, "dragonfruit"),
            general_recommendation(1)
        );
        assert_eq!(yield_info("dragonfruit"), NO_YIELD_DATA);
        assert_eq!(watering_method("dragonfruit"), DEFAULT_WATERING);
        assert!(crop_sensitivity("dragonfruit").is_none());
    }

    #[test]
    fn general_recommendation_fallback() {
        assert!(general_recommendation(0).contains("healthy"));
        assert_eq!(general_recommendation(9), UNDETERMINED_RECOMMENDATION);
    }

    #[test]
    fn garden_crops_have_watering_methods() {
        assert_eq!(watering_method("tomato"), "drip irrigation");
        assert_eq!(watering_method("basil"), "let topsoil dry");
        assert_eq!(crop_sensitivity("cucumber"), Some("powdery mildew"));
        assert_eq!(watering_method("rice"), DEFAULT_WATERING);
    }

    #[test]
    fn metadata_lists() {
        assert_eq!(crop_types().len(), 13);
        assert!(crop_types().contains(&"sugarcane"));
        assert_eq!(growth_stages().len(), 7);
        assert!(growth_stages().contains(&"boll_formation"));
    }

    proptest! {
        /// Lookups never panic and always return text
        #[test]
        fn prop_unknown_crops_never_fail(crop in "[a-z]{1,20}", level in any::<i64>()) {
            prop_assert!(!care_advice(StressBucket::from_level(level), &crop).is_empty());
            prop_assert!(!yield_info(&crop).is_empty());
            prop_assert!(!watering_method(&crop).is_empty());
        }

        /// Lookups are pure
        #[test]
        fn prop_lookups_are_idempotent(crop in "[a-z]{1,12}", level in -2i64..5) {
            prop_assert_eq!(
                care_advice(StressBucket::from_level(level), &crop),
                care_advice(StressBucket::from_level(level), &crop)
            );
            prop_assert_eq!(yield_info(&crop), yield_info(&crop));
        }
    }
}

// =============================================================================
// Symptom remedies
// =============================================================================

mod remedies {
    use super::*;

    #[test]
    fn every_symptom_has_a_remedy() {
        for tag in SymptomTag::ALL {
            let remedy = symptom_remedy(tag);
            assert!(!remedy.is_empty());
            assert!(remedy.immediate.starts_with("1."));
            assert!(remedy.follow_up.starts_with("3."));
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(symptom_remedy_by_name("Wilting"), symptom_remedy(SymptomTag::Wilting));
        assert!(symptom_remedy_by_name("frostbite").is_empty());
    }
}

// =============================================================================
// Soil moisture heuristic
// =============================================================================

mod soil_moisture {
    use super::*;

    #[test]
    fn offline_conditions() {
        // 40 + 20 (capped rainfall) + 4.5 (humidity) + 4.4 (temperature)
        let estimate = estimate_soil_moisture(5.0, 65.0, 28.0);
        assert!((estimate - 68.9).abs() < 1e-9);
    }

    proptest! {
        /// The estimate is always within 10-80 %
        #[test]
        fn prop_estimate_is_clamped(
            rainfall in 0.0f64..500.0,
            humidity in 0.0f64..100.0,
            temperature in -30.0f64..60.0
        ) {
            let estimate = estimate_soil_moisture(rainfall, humidity, temperature);
            prop_assert!((10.0..=80.0).contains(&estimate));
        }
    }
}
