use geo::{Rect, coord};
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of a grid cell.
///
/// Cells are treated as half-open on the low side: a cell covers
/// `(x_min, x_max] × (y_min, y_max]`, so adjacent cells never share mass.
///
/// # Examples
///
/// ```
/// use gridkde_types::bounds::CellBounds;
///
/// let cell = CellBounds::new(1.0, 1.1, 2.0, 2.1);
/// let local = cell.translate(-1.0, -2.0);
/// assert!((local.x_max - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl CellBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Build bounds from a `geo::Rect`.
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.max().x, rect.min().y, rect.max().y)
    }

    /// Shift the bounds by `(dx, dy)`.
    ///
    /// Used to express a cell relative to a kernel centre by passing the
    /// negated centre coordinates.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x_min + dx,
            self.x_max + dx,
            self.y_min + dy,
            self.y_max + dy,
        )
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.x_min, y: self.y_min },
            coord! { x: self.x_max, y: self.y_max },
        )
    }
}

impl From<Rect<f64>> for CellBounds {
    fn from(rect: Rect<f64>) -> Self {
        Self::from_rect(&rect)
    }
}
