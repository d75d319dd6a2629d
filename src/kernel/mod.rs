//! Kernel functions.
//!
//! A kernel here is not the density itself but its integral: given a range
//! expressed relative to the kernel centre, it returns the probability mass
//! the kernel places inside that range. Ranges are half-open on the low side,
//! `(x0, x1]` in 1D and `(x0, x1] × (y0, y1]` in 2D.
//!
//! The estimator only depends on [`Kernel2D`], so other kernel shapes can be
//! dropped in next to [`UniformKernel2D`].

pub mod uniform;

pub use uniform::{BOUNDARY_EPSILON, UniformKernel1D, UniformKernel2D};

use crate::error::{GridKdeError, Result};

/// Integral of a 1D probability density over an interval.
pub trait Kernel1D {
    /// P(x0 < X <= x1) for a kernel centred at 0 with bandwidth `h`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `x0 > x1`, `h <= 0`, or any argument is NaN.
    fn probability(&self, x0: f64, x1: f64, h: f64) -> Result<f64>;
}

/// Integral of a 2D probability density over an axis-aligned rectangle.
pub trait Kernel2D {
    /// P(x0 < X <= x1, y0 < Y <= y1) for a kernel centred at the origin with
    /// bandwidth `h`. The rectangle is already relative to the kernel centre.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `x0 > x1`, `y0 > y1`, `h <= 0`, or any
    /// argument is NaN.
    fn probability(&self, x0: f64, x1: f64, y0: f64, y1: f64, h: f64) -> Result<f64>;

    /// Half-width of the square outside of which the kernel has no mass.
    fn support_radius(&self, h: f64) -> f64 {
        h
    }
}

/// Reject a non-positive or non-finite bandwidth.
pub fn check_bandwidth(h: f64) -> Result<()> {
    if !h.is_finite() || h <= 0.0 {
        return Err(GridKdeError::invalid_parameter(
            "bandwidth",
            h,
            "bandwidth (h) must be finite and larger than 0",
        ));
    }
    Ok(())
}

/// Validate the arguments of [`Kernel1D::probability`].
pub fn check_range_1d(x0: f64, x1: f64, h: f64) -> Result<()> {
    if x0.is_nan() || x1.is_nan() {
        return Err(GridKdeError::invalid_parameter(
            "range",
            format!("({}, {}]", x0, x1),
            "range bounds must not be NaN",
        ));
    }
    if x0 > x1 {
        return Err(GridKdeError::invalid_parameter(
            "range",
            format!("({}, {}]", x0, x1),
            "x0 > x1",
        ));
    }
    check_bandwidth(h)
}

/// Validate the arguments of [`Kernel2D::probability`].
pub fn check_range_2d(x0: f64, x1: f64, y0: f64, y1: f64, h: f64) -> Result<()> {
    let malformed = |reason: &str| {
        GridKdeError::invalid_parameter(
            "rectangle",
            format!("({}, {}] x ({}, {}]", x0, x1, y0, y1),
            reason,
        )
    };
    if [x0, x1, y0, y1].iter().any(|v| v.is_nan()) {
        return Err(malformed("rectangle bounds must not be NaN"));
    }
    if x0 > x1 || y0 > y1 {
        return Err(malformed("x0 > x1 or y0 > y1"));
    }
    check_bandwidth(h)
}
