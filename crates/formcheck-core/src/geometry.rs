//! Planar joint geometry.
//!
//! Angles are measured in the image plane only. Depth from a single camera
//! is too noisy to contribute, so `z` is ignored throughout.

use nalgebra::Point2;

use crate::types::Landmark;

/// Angle at `vertex` between the rays `vertex → a` and `vertex → b`, in
/// degrees within [0, 180].
///
/// The difference of the two ray headings is folded so the reflex side
/// never surfaces: a raw difference above 180° becomes `360° - difference`.
pub fn calculate_angle(a: &Landmark, vertex: &Landmark, b: &Landmark) -> f64 {
    let origin = vertex.to_point2();
    let ray_a = a.to_point2() - origin;
    let ray_b = b.to_point2() - origin;

    let radians = ray_b.y.atan2(ray_b.x) - ray_a.y.atan2(ray_a.x);
    let degrees = radians.abs().to_degrees();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Angle at `vertex` when all three landmarks are present
pub fn joint_angle(
    a: Option<&Landmark>,
    vertex: Option<&Landmark>,
    b: Option<&Landmark>,
) -> Option<f64> {
    Some(calculate_angle(a?, vertex?, b?))
}

/// Midpoint of two landmarks in the image plane
pub fn midpoint(a: &Landmark, b: &Landmark) -> Point2<f64> {
    nalgebra::center(&a.to_point2(), &b.to_point2())
}

/// Absolute horizontal distance between the midpoints of two landmark pairs
pub fn horizontal_offset(pair_a: (&Landmark, &Landmark), pair_b: (&Landmark, &Landmark)) -> f64 {
    let mid_a = midpoint(pair_a.0, pair_a.1);
    let mid_b = midpoint(pair_b.0, pair_b.1);
    (mid_a.x - mid_b.x).abs()
}
