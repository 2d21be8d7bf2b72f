//! Tests for input validation and pagination arithmetic

use proptest::prelude::*;
use shared::{
    is_supported_crop, is_supported_growth_stage, validate_coordinates, validate_report,
    CropContext, Pagination, SubmitReportInput, MAX_PER_PAGE,
};

fn report(latitude: f64, longitude: f64) -> SubmitReportInput {
    SubmitReportInput {
        crop_type: "wheat".to_string(),
        growth_stage: "grain_fill".to_string(),
        notes: Some("Leaves drooping after noon".to_string()),
        latitude,
        longitude,
        location: None,
    }
}

mod coordinates {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(90.01, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    proptest! {
        #[test]
        fn prop_in_range_coordinates_pass(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(validate_coordinates(lat, lon).is_ok());
            prop_assert!(validate_report(&report(lat, lon)).is_ok());
        }

        #[test]
        fn prop_out_of_range_latitude_fails(lat in 90.001f64..1000.0, lon in -180.0f64..=180.0) {
            prop_assert!(validate_coordinates(lat, lon).is_err());
            prop_assert!(validate_coordinates(-lat, lon).is_err());
        }
    }
}

mod reports {
    use super::*;

    #[test]
    fn valid_report() {
        assert!(validate_report(&report(30.7, 76.7)).is_ok());
    }

    #[test]
    fn missing_fields_are_listed() {
        let mut input = report(30.7, 76.7);
        input.crop_type = String::new();
        input.growth_stage = "   ".to_string();

        let errors = validate_report(&input).unwrap_err();
        assert!(errors.iter().any(|e| e.starts_with("crop_type")));
        assert!(errors.iter().any(|e| e.starts_with("growth_stage")));
    }

    #[test]
    fn bad_coordinates_are_listed() {
        let errors = validate_report(&report(91.0, 200.0)).unwrap_err();
        assert!(errors.iter().any(|e| e.starts_with("latitude")));
        assert!(errors.iter().any(|e| e.starts_with("longitude")));
    }

    #[test]
    fn each_problem_is_reported_once() {
        let mut input = report(f64::NAN, 500.0);
        input.crop_type = " ".to_string();

        let errors = validate_report(&input).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "crop_type: is required".to_string(),
                "latitude: must be numeric".to_string(),
                "longitude: Invalid longitude".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_crop_is_valid_input() {
        let mut input = report(0.0, 0.0);
        input.crop_type = "Dragonfruit".to_string();
        assert!(validate_report(&input).is_ok());
        assert!(!is_supported_crop(&input.crop_type));
    }

    #[test]
    fn supported_categories_ignore_case() {
        assert!(is_supported_crop(" Sugarcane "));
        assert!(is_supported_growth_stage("POD_FILL"));
        assert!(!is_supported_growth_stage("seedling"));
    }

    #[test]
    fn crop_context_normalizes() {
        let context = CropContext::new("  Tomato ", "Flowering");
        assert_eq!(context.crop_type, "tomato");
        assert_eq!(context.growth_stage, "flowering");
        assert!(context.crop().is_some());
        assert!(context.stage().is_some());
    }
}

mod pagination {
    use super::*;

    #[test]
    fn defaults() {
        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 100);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn normalization_clamps() {
        let pagination = Pagination { page: 0, per_page: 10_000 }.normalized();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn page_counts() {
        let pagination = Pagination { page: 2, per_page: 10 };
        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(10), 1);
        assert_eq!(pagination.total_pages(11), 2);
    }

    proptest! {
        /// Every item lands on exactly one page
        #[test]
        fn prop_pages_cover_all_items(total in 0u64..10_000, per_page in 1u32..=MAX_PER_PAGE) {
            let pagination = Pagination { page: 1, per_page };
            let pages = u64::from(pagination.total_pages(total));
            prop_assert!(pages * u64::from(per_page) >= total);
            if pages > 0 {
                prop_assert!((pages - 1) * u64::from(per_page) < total);
            }
        }
    }
}
