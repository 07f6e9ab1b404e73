//! Validation utilities for TerraGuard inputs

use crate::models::LocationMeta;

/// Validate geographic coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90 degrees");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}

/// Validate the optional parts of location metadata that are present
pub fn validate_location(location: &LocationMeta) -> Result<(), &'static str> {
    validate_coordinates(location.latitude.unwrap_or(0.0), location.longitude.unwrap_or(0.0))?;

    if let Some(slope) = location.slope {
        if !(0.0..=90.0).contains(&slope) {
            return Err("Slope must be between 0 and 90 degrees");
        }
    }
    Ok(())
}

/// Check that an NDVI reading is within the index's valid range
pub fn is_valid_ndvi(ndvi: f64) -> bool {
    (-1.0..=1.0).contains(&ndvi)
}
