//! Grid kernel density estimation.
//!
//! For every input point the estimator asks the grid which cells meet the
//! kernel's support square, evaluates the kernel on each candidate cell in
//! point-local coordinates, and adds `probability × weight` to that cell.
//!
//! ```text
//! points ──► support square ──► candidate cells ──► kernel(cell - point) ──► Σ per cell
//! ```
//!
//! Points are independent, so with the `parallel` feature each rayon worker
//! folds its share of the points into a private [`DensityMap`] and the
//! partial maps are summed at the end.

use crate::config::{EstimatorConfig, ProcessingMode};
use crate::density::DensityMap;
use crate::error::Result;
use crate::grid::GridIndex;
use crate::kernel::{Kernel2D, UniformKernel2D, check_bandwidth};
use crate::validation::validate_weighted_points;
use geo::{Rect, coord};
use gridkde_types::WeightedPoint;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Kernel density estimator over a grid.
///
/// `estimate` returns the expectation per cell: each point spreads its weight
/// over the cells its kernel reaches. Plain points (`geo::Point`, `(x, y)`)
/// carry weight 1, which turns the result into a density.
///
/// # Examples
///
/// ```rust
/// use gridkde::{GridEstimator, GridLevel, VirtualGrid};
/// use geo::Point;
///
/// let estimator = GridEstimator::new(VirtualGrid::new());
/// let points = [Point::new(1.0, 1.0), Point::new(1.0, 1.3)];
///
/// let density = estimator
///     .estimate(&points, 0.2, Some(GridLevel::Grid0_1))?
///     .expect("both points reach the grid");
///
/// // each point distributes (almost exactly) unit mass
/// assert!((density.total() - 2.0).abs() < 5e-3);
/// # Ok::<(), gridkde::GridKdeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridEstimator<I: GridIndex, K: Kernel2D = UniformKernel2D> {
    index: I,
    kernel: K,
    config: EstimatorConfig,
}

/// Counters collected while accumulating, reported through `log`.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    candidates: usize,
    zero: usize,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            candidates: self.candidates + other.candidates,
            zero: self.zero + other.zero,
        }
    }
}

impl<I: GridIndex> GridEstimator<I, UniformKernel2D> {
    /// Create an estimator with the uniform disk kernel and default configuration.
    pub fn new(index: I) -> Self {
        Self {
            index,
            kernel: UniformKernel2D::new(),
            config: EstimatorConfig::default(),
        }
    }
}

impl<I: GridIndex, K: Kernel2D> GridEstimator<I, K> {
    /// Swap the kernel, keeping the grid and configuration.
    pub fn with_kernel<K2: Kernel2D>(self, kernel: K2) -> GridEstimator<I, K2> {
        GridEstimator {
            index: self.index,
            kernel,
            config: self.config,
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Spread every point's weight over the grid cells its kernel reaches.
    ///
    /// * `points` - anything convertible to [`WeightedPoint`]; unweighted
    ///   points count as weight 1
    /// * `bandwidth` - kernel bandwidth `h`, in the grid's coordinate units
    /// * `level` - grid resolution, the indexer's default when `None`
    ///
    /// Returns `Ok(None)` when no cell received any mass (empty input, or
    /// every contribution evaluated to zero).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-positive or non-finite bandwidth, or a
    /// point with non-finite coordinates or a negative weight. These are
    /// checked before any grid lookups happen. Errors from the grid indexer
    /// or the kernel abort the whole estimation.
    pub fn estimate<P>(
        &self,
        points: &[P],
        bandwidth: f64,
        level: Option<I::Level>,
    ) -> Result<Option<DensityMap<I::CellId>>>
    where
        P: Into<WeightedPoint> + Copy + Sync,
        I: Sync,
        K: Sync,
    {
        check_bandwidth(bandwidth)?;
        if points.is_empty() {
            log::debug!("density estimation skipped: no input points");
            return Ok(None);
        }

        let points: Vec<WeightedPoint> = points.iter().map(|&p| p.into()).collect();
        validate_weighted_points(&points)?;

        let level = level.unwrap_or_default();
        log::debug!(
            "estimating density: {} points, bandwidth {}, level {:?}, mode {:?}",
            points.len(),
            bandwidth,
            level,
            self.config.processing_mode
        );

        let (map, tally) = if self.use_parallel(points.len()) {
            self.accumulate_parallel(&points, bandwidth, level)?
        } else {
            self.accumulate_sequential(&points, bandwidth, level)?
        };

        log::debug!(
            "density estimation done: {} cells filled from {} candidates ({} without mass)",
            map.len(),
            tally.candidates,
            tally.zero
        );

        Ok((!map.is_empty()).then_some(map))
    }

    fn use_parallel(&self, point_count: usize) -> bool {
        if self.config.processing_mode != ProcessingMode::Parallel
            || point_count < self.config.parallel_min_points
        {
            return false;
        }
        if cfg!(feature = "parallel") {
            true
        } else {
            log::warn!(
                "parallel processing requested but the `parallel` feature is disabled; running sequentially"
            );
            false
        }
    }

    fn accumulate_sequential(
        &self,
        points: &[WeightedPoint],
        bandwidth: f64,
        level: I::Level,
    ) -> Result<(DensityMap<I::CellId>, Tally)> {
        let mut map = DensityMap::new();
        let mut tally = Tally::default();
        for point in points {
            tally = tally.merge(self.accumulate_point(&mut map, point, bandwidth, level)?);
        }
        Ok((map, tally))
    }

    #[cfg(feature = "parallel")]
    fn accumulate_parallel(
        &self,
        points: &[WeightedPoint],
        bandwidth: f64,
        level: I::Level,
    ) -> Result<(DensityMap<I::CellId>, Tally)>
    where
        I: Sync,
        K: Sync,
    {
        points
            .par_iter()
            .try_fold(
                || (DensityMap::new(), Tally::default()),
                |(mut map, tally), point| -> Result<(DensityMap<I::CellId>, Tally)> {
                    let counted = self.accumulate_point(&mut map, point, bandwidth, level)?;
                    Ok((map, tally.merge(counted)))
                },
            )
            .try_reduce(
                || (DensityMap::new(), Tally::default()),
                |(mut left, left_tally), (right, right_tally)| -> Result<(DensityMap<I::CellId>, Tally)> {
                    left.merge(right);
                    Ok((left, left_tally.merge(right_tally)))
                },
            )
    }

    #[cfg(not(feature = "parallel"))]
    fn accumulate_parallel(
        &self,
        points: &[WeightedPoint],
        bandwidth: f64,
        level: I::Level,
    ) -> Result<(DensityMap<I::CellId>, Tally)> {
        self.accumulate_sequential(points, bandwidth, level)
    }

    // Steps for a single point: support square, candidate cells, kernel in
    // point-local coordinates, weighted accumulation of positive mass.
    fn accumulate_point(
        &self,
        map: &mut DensityMap<I::CellId>,
        point: &WeightedPoint,
        bandwidth: f64,
        level: I::Level,
    ) -> Result<Tally> {
        let (x, y) = (point.x(), point.y());
        let reach = self.kernel.support_radius(bandwidth);
        let support = Rect::new(
            coord! { x: x - reach, y: y - reach },
            coord! { x: x + reach, y: y + reach },
        );

        let cells = self.index.cells_overlapping(&support, level)?;
        log::trace!("point ({}, {}): {} candidate cells", x, y, cells.len());

        let mut tally = Tally {
            candidates: cells.len(),
            zero: 0,
        };
        for cell in cells {
            let local = self.index.cell_bounds(&cell)?.translate(-x, -y);
            let probability = self.kernel.probability(
                local.x_min,
                local.x_max,
                local.y_min,
                local.y_max,
                bandwidth,
            )?;
            if probability > 0.0 {
                map.add(cell, probability * point.weight());
            } else {
                tally.zero += 1;
            }
        }
        Ok(tally)
    }
}
