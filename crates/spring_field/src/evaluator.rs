use glam::{Mat3, Vec3};

use crate::spring::Spring;

/// Spring lengths at or below this are degenerate: the axis is undefined,
/// so the spring contributes neither force nor derivative instead of a NaN.
pub(crate) const LENGTH_EPSILON: f32 = 1e-6;

/// Unit axis and elongation of one spring at the current configuration.
pub(crate) struct SpringAxis {
    pub unit: Vec3,
    pub length: f32,
    pub elongation: f32,
}

/// Geometry shared by the force and derivative passes. `None` when the
/// spring is degenerate (near-zero length) or slack (elongation-only spring
/// at or below rest length); both passes must then skip it, so that the
/// derivative vanishes exactly where the force does.
pub(crate) fn spring_axis(spring: &Spring, p1: Vec3, p2: Vec3) -> Option<SpringAxis> {
    let d = p2 - p1;
    let length = d.length();
    if length <= LENGTH_EPSILON {
        return None;
    }
    let elongation = length - spring.rest_length;
    if spring.elongation_only && elongation <= 0.0 {
        return None;
    }
    Some(SpringAxis {
        unit: d / length,
        length,
        elongation,
    })
}

/// Force exerted on endpoint 1; endpoint 2 receives the exact negation.
/// A stretched spring pulls its endpoints together, so the force on
/// endpoint 1 points toward endpoint 2 while elongation is positive.
pub(crate) fn spring_force(spring: &Spring, axis: &SpringAxis, v1: Vec3, v2: Vec3) -> Vec3 {
    let closing = (v2 - v1).dot(axis.unit);
    let magnitude = spring.stiffness * axis.elongation + spring.damping_factor * closing;
    axis.unit * magnitude
}

/// Local elastic stiffness block `M = df1/dp2`:
///
/// `M = k * u*u^T + k * (e/L) * (I - u*u^T)`
///
/// The axial term is the spring constant along the current axis, the
/// tangential term accounts for the axis rotating as the endpoints move.
/// The four global blocks are -M at (r1,r1) and (r2,r2), +M at (r1,r2)
/// and (r2,r1).
pub(crate) fn spring_stiffness_block(spring: &Spring, axis: &SpringAxis) -> Mat3 {
    let u = axis.unit;
    let outer = Mat3::from_cols(u * u.x, u * u.y, u * u.z);
    let tangential = (Mat3::IDENTITY - outer) * (axis.elongation / axis.length);
    (outer + tangential) * spring.stiffness
}
