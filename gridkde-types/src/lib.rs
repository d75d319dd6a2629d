//! # gridkde-types
//!
//! Plain data types shared by the `gridkde` density estimator.
//!
//! - **Point types**: `WeightedPoint`
//! - **Cell types**: `CellBounds`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use gridkde_types::point::WeightedPoint;
//! use geo::Point;
//!
//! let station = WeightedPoint::new(116.39, 39.91, 12.0);
//! let visit: WeightedPoint = Point::new(116.40, 39.92).into();
//! assert_eq!(visit.weight(), 1.0);
//! ```

pub mod bounds;
pub mod point;

pub use bounds::CellBounds;
pub use point::WeightedPoint;
