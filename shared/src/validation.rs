//! Validation utilities for the Crop Stress Advisory Platform

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{CropType, GrowthStage, SubmitReportInput};
use crate::types::GpsCoordinates;

/// Validate latitude/longitude ranges
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err("Latitude and longitude must be numeric");
    }
    if !GpsCoordinates::new(latitude, longitude).is_valid() {
        return Err("Invalid latitude/longitude coordinates");
    }
    Ok(())
}

/// Unknown crops are accepted by the pipeline; this only reports whether the
/// knowledge base has specific guidance
pub fn is_supported_crop(crop_type: &str) -> bool {
    CropType::parse(crop_type).is_some()
}

pub fn is_supported_growth_stage(growth_stage: &str) -> bool {
    GrowthStage::parse(growth_stage).is_some()
}

/// Flatten validator errors into `field: message` lines
pub fn describe_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid value ({})", field, err.code),
            })
        })
        .collect();
    messages.sort();
    messages
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "is required"));
    }
    Ok(())
}

pub fn latitude_in_range(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid("not_finite", "must be numeric"));
    }
    if !(-90.0..=90.0).contains(&value) {
        return Err(invalid("range", "Invalid latitude"));
    }
    Ok(())
}

pub fn longitude_in_range(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid("not_finite", "must be numeric"));
    }
    if !(-180.0..=180.0).contains(&value) {
        return Err(invalid("range", "Invalid longitude"));
    }
    Ok(())
}

/// Validate a submitted report, returning every problem found
pub fn validate_report(input: &SubmitReportInput) -> Result<(), Vec<String>> {
    input
        .validate()
        .map_err(|errors| describe_validation_errors(&errors))
}
