use geo::Point;
use serde::{Deserialize, Serialize};

/// A 2D point carrying a non-negative weight.
///
/// The weight is the amount of mass the point spreads over the grid: a weight
/// of 1.0 yields a plain density, any other weight yields an expectation
/// (population, count, revenue and so on).
///
/// # Examples
///
/// ```
/// use gridkde_types::point::WeightedPoint;
///
/// let shop = WeightedPoint::new(1.0, 1.0, 250.0);
/// assert_eq!(shop.x(), 1.0);
/// assert_eq!(shop.weight(), 250.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    /// Location of the point (longitude/latitude or projected x/y)
    pub point: Point<f64>,
    /// Mass carried by the point
    #[serde(default = "WeightedPoint::default_weight")]
    pub weight: f64,
}

impl WeightedPoint {
    const fn default_weight() -> f64 {
        1.0
    }

    /// Create a weighted point from raw coordinates.
    pub fn new(x: f64, y: f64, weight: f64) -> Self {
        Self {
            point: Point::new(x, y),
            weight,
        }
    }

    /// Create a point with unit weight.
    ///
    /// ```
    /// use gridkde_types::point::WeightedPoint;
    ///
    /// assert_eq!(WeightedPoint::unit(0.5, 0.5).weight(), 1.0);
    /// ```
    pub fn unit(x: f64, y: f64) -> Self {
        Self::new(x, y, Self::default_weight())
    }

    /// Attach a weight to an existing point.
    pub fn from_point_and_weight(point: Point<f64>, weight: f64) -> Self {
        Self { point, weight }
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Return a copy with the weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            point: self.point,
            weight: self.weight * factor,
        }
    }
}

impl From<Point<f64>> for WeightedPoint {
    fn from(point: Point<f64>) -> Self {
        Self::from_point_and_weight(point, Self::default_weight())
    }
}

impl From<(f64, f64)> for WeightedPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::unit(x, y)
    }
}

impl From<(f64, f64, f64)> for WeightedPoint {
    fn from((x, y, weight): (f64, f64, f64)) -> Self {
        Self::new(x, y, weight)
    }
}
