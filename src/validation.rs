//! Input validation for estimation requests.

use crate::error::{GridKdeError, Result};
use gridkde_types::WeightedPoint;

/// Validates a single weighted point.
///
/// Coordinates must be finite and the weight finite and non-negative.
///
/// # Examples
///
/// ```
/// use gridkde::validation::validate_weighted_point;
/// use gridkde::WeightedPoint;
///
/// assert!(validate_weighted_point(&WeightedPoint::new(1.0, 1.0, 2.0)).is_ok());
/// assert!(validate_weighted_point(&WeightedPoint::new(1.0, f64::NAN, 2.0)).is_err());
/// assert!(validate_weighted_point(&WeightedPoint::new(1.0, 1.0, -0.5)).is_err());
/// ```
pub fn validate_weighted_point(point: &WeightedPoint) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() || !y.is_finite() {
        return Err(GridKdeError::invalid_parameter(
            "point",
            format!("({}, {})", x, y),
            "coordinates must be finite",
        ));
    }

    let weight = point.weight();
    if !weight.is_finite() || weight < 0.0 {
        return Err(GridKdeError::invalid_parameter(
            "weight",
            weight,
            "weight must be finite and non-negative",
        ));
    }

    Ok(())
}

/// Validates every point, reporting the index of the first offender.
pub fn validate_weighted_points(points: &[WeightedPoint]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_weighted_point(point).map_err(|e| match e {
            GridKdeError::InvalidParameter {
                name,
                value,
                reason,
            } => GridKdeError::InvalidParameter {
                name,
                value,
                reason: format!("point at index {}: {}", idx, reason),
            },
            other => other,
        })?;
    }
    Ok(())
}
