//! Geohash cells as a density grid.
//!
//! Each geohash at a fixed precision is a rectangle of constant size in
//! lon/lat, so a region can be covered by walking cell centres from the cell
//! holding the region's lower-left corner.

use super::GridIndex;
use crate::error::{GridKdeError, Result};
use geo::Rect;
use geohash::{decode_bbox, encode};
use gridkde_types::CellBounds;
use serde::{Deserialize, Serialize};

/// Geohash precision (hash length), 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeohashPrecision(usize);

impl GeohashPrecision {
    pub const MIN: usize = 1;
    pub const MAX: usize = 12;

    pub fn new(precision: usize) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&precision) {
            return Err(GridKdeError::invalid_parameter(
                "geohash_precision",
                precision,
                "geohash precision must be between 1 and 12",
            ));
        }
        Ok(Self(precision))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for GeohashPrecision {
    fn default() -> Self {
        Self(7) // Street-level precision by default
    }
}

/// Grid whose cells are geohashes.
///
/// # Examples
///
/// ```
/// use gridkde::grid::{GeohashGrid, GeohashPrecision, GridIndex};
/// use geo::{Rect, coord};
///
/// let grid = GeohashGrid::new();
/// let region = Rect::new(coord! { x: -74.01, y: 40.71 }, coord! { x: -74.00, y: 40.72 });
/// let cells = grid.cells_overlapping(&region, GeohashPrecision::new(6)?)?;
/// assert!(cells.iter().all(|hash| hash.len() == 6));
/// # Ok::<(), gridkde::GridKdeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GeohashGrid;

impl GeohashGrid {
    pub fn new() -> Self {
        Self
    }
}

impl GridIndex for GeohashGrid {
    type CellId = String;
    type Level = GeohashPrecision;

    fn cells_overlapping(&self, region: &Rect<f64>, level: GeohashPrecision) -> Result<Vec<String>> {
        // Re-check in case the value was deserialized rather than built with `new`.
        let precision = GeohashPrecision::new(level.get())?.get();

        let x0 = region.min().x.max(-180.0);
        let x1 = region.max().x.min(180.0);
        let y0 = region.min().y.max(-90.0);
        let y1 = region.max().y.min(90.0);
        if x0 > x1 || y0 > y1 {
            return Ok(Vec::new());
        }

        let origin = decode_bbox(&encode(geohash::Coord { x: x0, y: y0 }, precision)?)?;
        let (width, height) = (origin.width(), origin.height());
        let start = origin.center();

        let mut cells = Vec::new();
        let mut cy = start.y;
        while cy - height / 2.0 <= y1 && cy < 90.0 {
            let mut cx = start.x;
            while cx - width / 2.0 <= x1 && cx < 180.0 {
                cells.push(encode(geohash::Coord { x: cx, y: cy }, precision)?);
                cx += width;
            }
            cy += height;
        }

        log::trace!(
            "geohash cover at precision {}: {} cells ({}x{} deg each)",
            precision,
            cells.len(),
            width,
            height
        );
        Ok(cells)
    }

    fn cell_bounds(&self, cell: &String) -> Result<CellBounds> {
        Ok(CellBounds::from_rect(&decode_bbox(cell)?))
    }
}
