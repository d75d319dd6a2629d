//! Grid-based kernel density estimation for weighted 2D points.
//!
//! ```rust
//! use gridkde::{GridEstimator, GridLevel, VirtualGrid, WeightedPoint};
//!
//! let estimator = GridEstimator::new(VirtualGrid::new());
//! let shops = [
//!     WeightedPoint::new(1.00, 1.00, 120.0),
//!     WeightedPoint::new(1.00, 1.30, 80.0),
//! ];
//!
//! let expectation = estimator.estimate(&shops, 0.2, Some(GridLevel::Grid0_1))?;
//! if let Some(map) = expectation {
//!     assert!((map.total() - 200.0).abs() < 1.0);
//! }
//! # Ok::<(), gridkde::GridKdeError>(())
//! ```

pub mod config;
pub mod density;
pub mod error;
pub mod estimator;
pub mod geometry;
pub mod grid;
pub mod kernel;
pub mod validation;

pub use config::{EstimatorConfig, ProcessingMode};
pub use density::DensityMap;
pub use error::{GridKdeError, Result};
pub use estimator::GridEstimator;
pub use grid::{GeohashGrid, GeohashPrecision, GridCellId, GridIndex, GridLevel, VirtualGrid};
pub use kernel::{Kernel1D, Kernel2D, UniformKernel1D, UniformKernel2D};

pub use geo::{Point, Rect};
pub use gridkde_types::{CellBounds, WeightedPoint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridEstimator, GridKdeError, Result};

    pub use crate::{DensityMap, EstimatorConfig, ProcessingMode};

    pub use crate::{GeohashGrid, GeohashPrecision, GridCellId, GridIndex, GridLevel, VirtualGrid};

    pub use crate::{Kernel2D, UniformKernel2D};

    pub use crate::{CellBounds, WeightedPoint};

    pub use geo::{Point, Rect};
}
