//! Geometry kernel
//!
//! Stateless primitives over landmark positions. Every scoring primitive has
//! the same shape: a raw deviation in normalized coordinate units, linearly
//! rescaled and clamped into the 0-100 band (100 = ideal).
//!
//! Degenerate inputs (coincident points, zero-length vectors) never panic:
//! the `try_*` variants return `None` and the plain variants return a
//! defined sentinel instead.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Vectors shorter than this are treated as zero-length
pub const EPSILON: f64 = 1e-6;

/// A position in the normalized landmark coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point halfway between `a` and `b`
    pub fn midpoint(a: Point3, b: Point3) -> Point3 {
        Point3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Length of the vector projected onto the x,y plane
    pub fn norm_2d(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees [0, 180].
///
/// Returns `None` when either ray has zero length.
pub fn try_angle_3d(a: Point3, b: Point3, c: Point3) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    let (len_ba, len_bc) = (ba.norm(), bc.norm());
    if len_ba < EPSILON || len_bc < EPSILON {
        return None;
    }

    let cosine = (ba.dot(&bc) / (len_ba * len_bc)).clamp(-1.0, 1.0);
    Some(cosine.acos().to_degrees())
}

/// [`try_angle_3d`] with the degenerate case mapped to 0°
pub fn angle_3d(a: Point3, b: Point3, c: Point3) -> f64 {
    try_angle_3d(a, b, c).unwrap_or(0.0)
}

/// Angle at vertex `b` measured in the x,y plane only, in degrees [0, 180].
///
/// Computed as the difference of the two ray headings; results above 180°
/// are reflected to `360 - angle`. Returns `None` for zero-length rays.
pub fn try_angle_2d(a: Point3, b: Point3, c: Point3) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    if ba.norm_2d() < EPSILON || bc.norm_2d() < EPSILON {
        return None;
    }

    let angle = (bc.y.atan2(bc.x) - ba.y.atan2(ba.x)).to_degrees().abs();
    Some(if angle > 180.0 { 360.0 - angle } else { angle })
}

/// [`try_angle_2d`] with the degenerate case mapped to 0°
pub fn angle_2d(a: Point3, b: Point3, c: Point3) -> f64 {
    try_angle_2d(a, b, c).unwrap_or(0.0)
}

/// Euclidean distance in the x,y plane (depth is excluded)
pub fn distance(a: Point3, b: Point3) -> f64 {
    (a - b).norm_2d()
}

/// Map a non-negative deviation onto the 0-100 band: `100 - scale * deviation`
pub fn linear_score(deviation: f64, scale: f64) -> f64 {
    (100.0 - scale * deviation.abs()).clamp(0.0, 100.0)
}

/// How well a set of points shares one height (y), 0-100.
///
/// Uses the largest pairwise y deviation. Fewer than two points score 100.
pub fn horizontal_alignment(points: &[Point3], scale: f64) -> f64 {
    linear_score(spread(points.iter().map(|p| p.y)), scale)
}

/// How well a set of points is stacked on one vertical (x), 0-100.
pub fn vertical_alignment(points: &[Point3], scale: f64) -> f64 {
    linear_score(spread(points.iter().map(|p| p.x)), scale)
}

/// How mirrored two paired points are around a reference point, 0-100.
///
/// The absolute difference of the two distances is taken relative to their
/// mean, so the score does not depend on how large the body appears in frame.
/// Returns `None` when both points sit on the reference.
pub fn try_symmetry(left: Point3, right: Point3, reference: Point3) -> Option<f64> {
    let left_distance = distance(left, reference);
    let right_distance = distance(right, reference);
    let mean_distance = (left_distance + right_distance) / 2.0;
    if mean_distance < EPSILON {
        return None;
    }

    Some(linear_score((left_distance - right_distance).abs() / mean_distance, 100.0))
}

/// [`try_symmetry`] with the degenerate case scored as perfectly symmetric
pub fn symmetry(left: Point3, right: Point3, reference: Point3) -> f64 {
    try_symmetry(left, right, reference).unwrap_or(100.0)
}

/// Perpendicular x,y distance from `point` to the line through `start` and `end`.
///
/// Returns `None` when `start` and `end` coincide.
pub fn try_line_deviation(start: Point3, end: Point3, point: Point3) -> Option<f64> {
    let line = end - start;
    let offset = point - start;
    let length = line.norm_2d();
    if length < EPSILON {
        return None;
    }

    Some((line.x * offset.y - line.y * offset.x).abs() / length)
}

/// [`try_line_deviation`] falling back to the distance from `start`
pub fn line_deviation(start: Point3, end: Point3, point: Point3) -> f64 {
    try_line_deviation(start, end, point).unwrap_or_else(|| distance(point, start))
}

/// Round to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn spread(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        0.0
    } else {
        max - min
    }
}
