//! Convex polygon clipping and area primitives.
//!
//! Everything here works on plain vertex rings (`Vec<Coord<f64>>`, no closing
//! duplicate vertex). The clipping routine is Sutherland–Hodgman, which is
//! exact for convex clip windows; the kernels only ever clip convex shapes
//! (an axis-aligned rectangle against a regular polygon).

use geo::{Coord, coord};
use once_cell::sync::Lazy;
use std::f64::consts::PI;

/// Number of vertices used to approximate the unit circle.
pub const DISK_VERTICES: usize = 100;

static UNIT_DISK: Lazy<Vec<Coord<f64>>> = Lazy::new(|| regular_polygon(DISK_VERTICES, 1.0));

/// The shared counter-clockwise `DISK_VERTICES`-gon inscribed in the unit circle.
///
/// Vertex angles are multiples of `2π / DISK_VERTICES` starting at 0, so with
/// the default vertex count the four axis points `(±1, 0)`, `(0, ±1)` are
/// vertices and the polygon is symmetric under both axis reflections.
pub fn unit_disk() -> &'static [Coord<f64>] {
    &UNIT_DISK
}

/// Build a counter-clockwise regular polygon with `n` vertices on a circle of `radius`.
pub fn regular_polygon(n: usize, radius: f64) -> Vec<Coord<f64>> {
    let step = 2.0 * PI / n as f64;
    (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            coord! { x: radius * angle.cos(), y: radius * angle.sin() }
        })
        .collect()
}

/// Counter-clockwise corner ring of the rectangle `[x0, x1] × [y0, y1]`.
pub fn rectangle(x0: f64, x1: f64, y0: f64, y1: f64) -> Vec<Coord<f64>> {
    vec![
        coord! { x: x0, y: y0 },
        coord! { x: x1, y: y0 },
        coord! { x: x1, y: y1 },
        coord! { x: x0, y: y1 },
    ]
}

#[inline]
fn cross(origin: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (a.y - origin.y) * (b.x - origin.x)
}

/// Clip `subject` against the convex, counter-clockwise polygon `clip`.
///
/// Returns the vertex ring of the intersection. An empty vector means the
/// shapes do not overlap; a ring with fewer than three vertices, or with
/// collinear vertices, has zero area and is left for the caller to measure.
/// Zero-length clip edges (degenerate rectangles) impose no constraint and
/// are skipped.
///
/// # Examples
///
/// ```
/// use gridkde::geometry::{clip_convex, polygon_area, rectangle};
///
/// let a = rectangle(0.0, 2.0, 0.0, 2.0);
/// let b = rectangle(1.0, 3.0, 1.0, 3.0);
/// let overlap = clip_convex(&a, &b);
/// assert!((polygon_area(&overlap) - 1.0).abs() < 1e-12);
/// ```
pub fn clip_convex(subject: &[Coord<f64>], clip: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut output: Vec<Coord<f64>> = subject.to_vec();
    if clip.len() < 3 {
        output.clear();
        return output;
    }

    let mut input: Vec<Coord<f64>> = Vec::with_capacity(subject.len() + clip.len());
    for (i, &a) in clip.iter().enumerate() {
        if output.is_empty() {
            break;
        }
        let b = clip[(i + 1) % clip.len()];
        if a == b {
            continue;
        }

        std::mem::swap(&mut input, &mut output);
        output.clear();

        let mut start = input[input.len() - 1];
        let mut start_side = cross(a, b, start);
        for &end in &input {
            let end_side = cross(a, b, end);
            match (start_side >= 0.0, end_side >= 0.0) {
                (true, true) => output.push(end),
                (true, false) => output.push(intersect(start, end, start_side, end_side)),
                (false, true) => {
                    output.push(intersect(start, end, start_side, end_side));
                    output.push(end);
                }
                (false, false) => {}
            }
            start = end;
            start_side = end_side;
        }
    }

    output
}

// Point where segment `s -> e` crosses the clip line, given the signed
// distances (scaled) of both endpoints to that line.
#[inline]
fn intersect(s: Coord<f64>, e: Coord<f64>, s_side: f64, e_side: f64) -> Coord<f64> {
    let t = s_side / (s_side - e_side);
    coord! {
        x: s.x + t * (e.x - s.x),
        y: s.y + t * (e.y - s.y),
    }
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Coord<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut prev = ring[ring.len() - 1];
    for &curr in ring {
        twice_area += prev.x * curr.y - curr.x * prev.y;
        prev = curr;
    }
    twice_area / 2.0
}

/// Unsigned shoelace area of a simple polygon ring.
pub fn polygon_area(ring: &[Coord<f64>]) -> f64 {
    signed_area(ring).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, BooleanOps, LineString, Polygon};

    fn to_polygon(ring: &[Coord<f64>]) -> Polygon<f64> {
        Polygon::new(LineString::from(ring.to_vec()), vec![])
    }

    #[test]
    fn test_unit_disk_shape() {
        let disk = unit_disk();
        assert_eq!(disk.len(), DISK_VERTICES);
        assert!(signed_area(disk) > 0.0, "disk must be counter-clockwise");

        // (N/2)·sin(2π/N) for a regular N-gon inscribed in the unit circle
        let expected = DISK_VERTICES as f64 / 2.0 * (2.0 * PI / DISK_VERTICES as f64).sin();
        assert!((polygon_area(disk) - expected).abs() < 1e-12);

        for axis in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
            assert!(
                disk.iter()
                    .any(|c| (c.x - axis.0).abs() < 1e-12 && (c.y - axis.1).abs() < 1e-12),
                "missing axis vertex {:?}",
                axis
            );
        }
    }

    #[test]
    fn test_rectangle_area_matches_geo() {
        let ring = rectangle(-1.5, 2.0, 0.25, 4.0);
        assert!((polygon_area(&ring) - to_polygon(&ring).unsigned_area()).abs() < 1e-12);
        assert!(signed_area(&ring) > 0.0);
    }

    #[test]
    fn test_clip_disjoint_is_empty() {
        let a = rectangle(0.0, 1.0, 0.0, 1.0);
        let b = rectangle(2.0, 3.0, 2.0, 3.0);
        assert_eq!(polygon_area(&clip_convex(&a, &b)), 0.0);
    }

    #[test]
    fn test_clip_contained_subject_unchanged() {
        let inner = rectangle(-0.1, 0.1, -0.1, 0.1);
        let clipped = clip_convex(&inner, unit_disk());
        assert!((polygon_area(&clipped) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_clip_is_commutative_for_convex_shapes() {
        let rect = rectangle(0.3, 1.7, -0.4, 0.6);
        let a = polygon_area(&clip_convex(&rect, unit_disk()));
        let b = polygon_area(&clip_convex(unit_disk(), &rect));
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_clip_matches_geo_boolean_ops() {
        let cases = [
            (0.3, 1.7, -0.4, 0.6),
            (-2.0, 0.0, -2.0, 2.0),
            (0.9, 1.2, 0.1, 0.2),
            (-0.75, 0.75, 0.5, 1.5),
        ];
        let disk = to_polygon(unit_disk());
        for (x0, x1, y0, y1) in cases {
            let rect = rectangle(x0, x1, y0, y1);
            let ours = polygon_area(&clip_convex(unit_disk(), &rect));
            let theirs = disk.intersection(&to_polygon(&rect)).unsigned_area();
            assert!(
                (ours - theirs).abs() < 1e-9,
                "rect ({}, {}, {}, {}): {} vs {}",
                x0,
                x1,
                y0,
                y1,
                ours,
                theirs
            );
        }
    }

    #[test]
    fn test_degenerate_clip_window_has_zero_area() {
        let line = rectangle(0.5, 0.5, -0.5, 0.5);
        let clipped = clip_convex(unit_disk(), &line);
        assert!(polygon_area(&clipped) < 1e-12);
    }

    #[test]
    fn test_signed_area_of_short_ring() {
        assert_eq!(signed_area(&[]), 0.0);
        assert_eq!(
            signed_area(&[coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]),
            0.0
        );
    }
}
