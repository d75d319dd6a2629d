//! Grid indexers.
//!
//! The estimator never inspects cell identifiers: it asks a [`GridIndex`]
//! which cells a region touches and what the bounds of each cell are.
//!
//! Two tessellations are provided:
//!
//! | Indexer         | Cell id         | Level                   |
//! |-----------------|-----------------|-------------------------|
//! | [`VirtualGrid`] | [`GridCellId`]  | [`GridLevel`] (degrees) |
//! | [`GeohashGrid`] | geohash string  | precision 1-12          |

pub mod geohash_grid;
pub mod virtual_grid;

pub use geohash_grid::{GeohashGrid, GeohashPrecision};
pub use virtual_grid::{GridCellId, VirtualGrid};

use crate::error::Result;
use geo::Rect;
use gridkde_types::CellBounds;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Spatial index mapping regions to grid cells and cells back to bounds.
///
/// Implementations must be free of side effects observable by the caller;
/// the estimator may call them from several threads at once.
pub trait GridIndex {
    /// Opaque cell identifier.
    type CellId: Clone + Eq + Hash + Send;
    /// Resolution selector. `Default` is used when the caller gives none.
    type Level: Copy + Default + std::fmt::Debug + Send + Sync;

    /// All cells at `level` whose extent intersects `region`.
    ///
    /// Cells that merely touch the region may be included.
    fn cells_overlapping(&self, region: &Rect<f64>, level: Self::Level) -> Result<Vec<Self::CellId>>;

    /// Spatial extent of `cell`.
    fn cell_bounds(&self, cell: &Self::CellId) -> Result<CellBounds>;
}

/// Resolution of a [`VirtualGrid`], named after the cell edge in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GridLevel {
    /// 1°
    Grid1,
    /// 0.5°
    Grid0_5,
    /// 0.1°
    Grid0_1,
    /// 0.05°
    Grid0_05,
    /// 0.01°
    Grid0_01,
    /// 0.005°, roughly 500 m at the equator
    #[default]
    Grid0_005,
    /// 0.001°
    Grid0_001,
}

impl GridLevel {
    pub const ALL: [GridLevel; 7] = [
        GridLevel::Grid1,
        GridLevel::Grid0_5,
        GridLevel::Grid0_1,
        GridLevel::Grid0_05,
        GridLevel::Grid0_01,
        GridLevel::Grid0_005,
        GridLevel::Grid0_001,
    ];

    /// Edge length of a cell in degrees.
    pub fn cell_size(&self) -> f64 {
        match self {
            GridLevel::Grid1 => 1.0,
            GridLevel::Grid0_5 => 0.5,
            GridLevel::Grid0_1 => 0.1,
            GridLevel::Grid0_05 => 0.05,
            GridLevel::Grid0_01 => 0.01,
            GridLevel::Grid0_005 => 0.005,
            GridLevel::Grid0_001 => 0.001,
        }
    }

    /// Small integer tag stored in cell ids.
    pub(crate) fn tag(&self) -> u64 {
        match self {
            GridLevel::Grid1 => 1,
            GridLevel::Grid0_5 => 2,
            GridLevel::Grid0_1 => 3,
            GridLevel::Grid0_05 => 4,
            GridLevel::Grid0_01 => 5,
            GridLevel::Grid0_005 => 6,
            GridLevel::Grid0_001 => 7,
        }
    }

    pub(crate) fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.tag() == tag)
    }
}
