//! Regular longitude/latitude tessellation.
//!
//! The grid is anchored at (-180, -90) and covers the whole world extent.
//! Cells are addressed by (row, col) at a given [`GridLevel`]; the triple is
//! packed into a single `u64` so ids stay cheap to hash and copy.

use super::{GridIndex, GridLevel};
use crate::error::{GridKdeError, Result};
use geo::Rect;
use gridkde_types::CellBounds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

const ORIGIN_X: f64 = -180.0;
const ORIGIN_Y: f64 = -90.0;
const WORLD_WIDTH: f64 = 360.0;
const WORLD_HEIGHT: f64 = 180.0;

const AXIS_BITS: u64 = 28;
const AXIS_MASK: u64 = (1 << AXIS_BITS) - 1;
const LEVEL_SHIFT: u64 = 2 * AXIS_BITS;

/// Identifier of a [`VirtualGrid`] cell.
///
/// Layout: `level tag << 56 | row << 28 | col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridCellId(u64);

impl GridCellId {
    fn pack(level: GridLevel, row: u64, col: u64) -> Self {
        GridCellId((level.tag() << LEVEL_SHIFT) | ((row & AXIS_MASK) << AXIS_BITS) | (col & AXIS_MASK))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Level encoded in the id, `None` if the tag is unknown.
    pub fn level(&self) -> Option<GridLevel> {
        GridLevel::from_tag(self.0 >> LEVEL_SHIFT)
    }

    pub fn row(&self) -> u64 {
        (self.0 >> AXIS_BITS) & AXIS_MASK
    }

    pub fn col(&self) -> u64 {
        self.0 & AXIS_MASK
    }
}

impl From<u64> for GridCellId {
    fn from(raw: u64) -> Self {
        GridCellId(raw)
    }
}

impl fmt::Display for GridCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level() {
            Some(level) => write!(f, "{:?}:{}:{}", level, self.row(), self.col()),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

/// Regular grid over the world lon/lat extent.
///
/// # Examples
///
/// ```
/// use gridkde::grid::{GridIndex, GridLevel, VirtualGrid};
/// use geo::{Rect, coord};
///
/// let grid = VirtualGrid::new();
/// let region = Rect::new(coord! { x: 1.01, y: 1.01 }, coord! { x: 1.09, y: 1.09 });
/// let cells = grid.cells_overlapping(&region, GridLevel::Grid0_1)?;
/// assert_eq!(cells.len(), 1);
///
/// let bounds = grid.cell_bounds(&cells[0])?;
/// assert!((bounds.x_min - 1.0).abs() < 1e-9);
/// # Ok::<(), gridkde::GridKdeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualGrid;

impl VirtualGrid {
    pub fn new() -> Self {
        Self
    }

    fn dimensions(level: GridLevel) -> (u64, u64) {
        let size = level.cell_size();
        (
            (WORLD_HEIGHT / size).round() as u64,
            (WORLD_WIDTH / size).round() as u64,
        )
    }

    fn edge(origin: f64, size: f64, index: u64) -> f64 {
        origin + index as f64 * size
    }

    /// Id of the cell at (`row`, `col`), if it lies on the grid.
    pub fn cell_at(&self, level: GridLevel, row: u64, col: u64) -> Option<GridCellId> {
        let (rows, cols) = Self::dimensions(level);
        (row < rows && col < cols).then(|| GridCellId::pack(level, row, col))
    }

    /// Id of the cell containing `(x, y)`.
    pub fn cell_containing(&self, x: f64, y: f64, level: GridLevel) -> Option<GridCellId> {
        if !(ORIGIN_X..=ORIGIN_X + WORLD_WIDTH).contains(&x)
            || !(ORIGIN_Y..=ORIGIN_Y + WORLD_HEIGHT).contains(&y)
        {
            return None;
        }
        let (rows, cols) = Self::dimensions(level);
        let size = level.cell_size();
        let row = *Self::span(y, y, ORIGIN_Y, size, rows).start();
        let col = *Self::span(x, x, ORIGIN_X, size, cols).start();
        self.cell_at(level, row, col)
    }

    // Indices of cells along one axis whose extent meets [lo, hi]. The
    // floor estimate is corrected against the same edge formula
    // `cell_bounds` uses, so both agree exactly on shared edges.
    fn span(lo: f64, hi: f64, origin: f64, size: f64, count: u64) -> RangeInclusive<u64> {
        let last = count - 1;
        let index_of = |v: f64| (((v - origin) / size).floor().max(0.0) as u64).min(last);

        let mut first = index_of(lo);
        while first > 0 && Self::edge(origin, size, first) > lo {
            first -= 1;
        }
        while first < last && Self::edge(origin, size, first + 1) <= lo {
            first += 1;
        }

        let mut end = index_of(hi).max(first);
        while end < last && Self::edge(origin, size, end + 1) < hi {
            end += 1;
        }
        while end > first && Self::edge(origin, size, end) > hi {
            end -= 1;
        }

        first..=end
    }
}

impl GridIndex for VirtualGrid {
    type CellId = GridCellId;
    type Level = GridLevel;

    fn cells_overlapping(&self, region: &Rect<f64>, level: GridLevel) -> Result<Vec<GridCellId>> {
        let x0 = region.min().x.max(ORIGIN_X);
        let x1 = region.max().x.min(ORIGIN_X + WORLD_WIDTH);
        let y0 = region.min().y.max(ORIGIN_Y);
        let y1 = region.max().y.min(ORIGIN_Y + WORLD_HEIGHT);
        if x0 > x1 || y0 > y1 {
            return Ok(Vec::new());
        }

        let (rows, cols) = Self::dimensions(level);
        let size = level.cell_size();
        let row_span = Self::span(y0, y1, ORIGIN_Y, size, rows);
        let col_span = Self::span(x0, x1, ORIGIN_X, size, cols);

        let mut cells = Vec::with_capacity(
            (row_span.end() - row_span.start() + 1) as usize
                * (col_span.end() - col_span.start() + 1) as usize,
        );
        for row in row_span {
            for col in col_span.clone() {
                cells.push(GridCellId::pack(level, row, col));
            }
        }
        Ok(cells)
    }

    fn cell_bounds(&self, cell: &GridCellId) -> Result<CellBounds> {
        let level = cell
            .level()
            .ok_or_else(|| GridKdeError::InvalidCell(format!("unknown level tag in {}", cell)))?;
        let (rows, cols) = Self::dimensions(level);
        let (row, col) = (cell.row(), cell.col());
        if row >= rows || col >= cols {
            return Err(GridKdeError::InvalidCell(format!(
                "{} is outside the {}x{} grid",
                cell, rows, cols
            )));
        }

        let size = level.cell_size();
        Ok(CellBounds::new(
            Self::edge(ORIGIN_X, size, col),
            Self::edge(ORIGIN_X, size, col + 1),
            Self::edge(ORIGIN_Y, size, row),
            Self::edge(ORIGIN_Y, size, row + 1),
        ))
    }
}
