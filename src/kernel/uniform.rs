//! Uniform kernels: constant density over `[-h, h]` (1D) or over the disk of
//! radius `h` (2D).

use super::{Kernel1D, Kernel2D, check_range_1d, check_range_2d};
use crate::error::Result;
use crate::geometry::{clip_convex, polygon_area, rectangle, unit_disk};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Tolerance for boundary classification, in bandwidth-normalised units.
///
/// Rectangles within this distance of missing the support entirely are
/// treated as disjoint, and clipped areas at or below it are snapped to 0.
pub const BOUNDARY_EPSILON: f64 = 1e-12;

/// Uniform kernel on the interval `[-h, h]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformKernel1D;

impl UniformKernel1D {
    pub fn new() -> Self {
        Self
    }
}

impl Kernel1D for UniformKernel1D {
    fn probability(&self, x0: f64, x1: f64, h: f64) -> Result<f64> {
        check_range_1d(x0, x1, h)?;
        let covered = x1.min(h) - x0.max(-h);
        if covered <= 0.0 {
            return Ok(0.0);
        }
        Ok((covered / (2.0 * h)).min(1.0))
    }
}

/// Uniform kernel on the disk of radius `h`.
///
/// The probability of a rectangle is the fraction of the disk it covers,
/// `area(rect ∩ disk) / (π·h²)`. Three cases are tried in order:
///
/// 1. the rectangle misses the square `[-h, h]²`: exactly 0;
/// 2. the rectangle lies inside the square inscribed in the disk: the
///    closed form `area(rect) / (π·h²)`;
/// 3. otherwise the rectangle is clipped against a 100-gon approximating the
///    disk and the clipped area is measured.
///
/// Only cells straddling the disk boundary pay for case 3.
///
/// # Examples
///
/// ```
/// use gridkde::kernel::{Kernel2D, UniformKernel2D};
///
/// let k = UniformKernel2D::new();
/// // right half of the disk
/// let p = k.probability(0.0, 5.0, -5.0, 5.0, 2.0)?;
/// assert!((p - 0.5).abs() < 1e-3);
/// // tangent on the right: no mass
/// assert_eq!(k.probability(2.0, 3.0, -1.0, 1.0, 2.0)?, 0.0);
/// # Ok::<(), gridkde::GridKdeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformKernel2D;

impl UniformKernel2D {
    pub fn new() -> Self {
        Self
    }

    // Case 1, normalised coordinates.
    fn is_disjoint(x0: f64, x1: f64, y0: f64, y1: f64) -> bool {
        let edge = 1.0 - BOUNDARY_EPSILON;
        x0 >= edge || y0 >= edge || x1 <= -edge || y1 <= -edge
    }

    // Case 2, normalised coordinates. No tolerance outward: a rectangle is
    // only accepted when it is provably inside the unit circle.
    fn within_inscribed_square(x0: f64, x1: f64, y0: f64, y1: f64) -> bool {
        x0 >= -FRAC_1_SQRT_2 && x1 <= FRAC_1_SQRT_2 && y0 >= -FRAC_1_SQRT_2 && y1 <= FRAC_1_SQRT_2
    }

    /// Case 3 on a rectangle already divided by the bandwidth.
    pub(crate) fn clipped_probability(x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
        // Nothing outside [-1, 1]² can meet the disk; clamping also keeps
        // infinite bounds out of the clipper.
        let window = rectangle(x0.max(-1.0), x1.min(1.0), y0.max(-1.0), y1.min(1.0));
        let area = polygon_area(&clip_convex(unit_disk(), &window));
        if area <= BOUNDARY_EPSILON {
            return 0.0;
        }
        (area / PI).clamp(0.0, 1.0)
    }
}

impl Kernel2D for UniformKernel2D {
    fn probability(&self, x0: f64, x1: f64, y0: f64, y1: f64, h: f64) -> Result<f64> {
        check_range_2d(x0, x1, y0, y1, h)?;

        let (x0, x1, y0, y1) = (x0 / h, x1 / h, y0 / h, y1 / h);

        if Self::is_disjoint(x0, x1, y0, y1) {
            return Ok(0.0);
        }
        if Self::within_inscribed_square(x0, x1, y0, y1) {
            return Ok((x1 - x0) * (y1 - y0) / PI);
        }
        Ok(Self::clipped_probability(x0, x1, y0, y1))
    }
}
