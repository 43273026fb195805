//! Vector and orientation helpers for the simulation core
//!
//! Plain arithmetic (`+`, `-`, scalar `*`, `norm`, `cross`, `dot`) comes straight
//! from nalgebra's `Vector3<f64>`. This module adds the guarded operations the
//! integrator needs on top of that:
//! - zero-safe normalization and distance,
//! - axis-angle rotations that degrade to identity for a zero axis,
//! - Hamilton-product composition and small-angle spin increments,
//! - drift-bounded quaternion renormalization.
//!
//! Every function here is pure and returns a new value, except
//! [`accumulate`], which adds into an explicitly passed accumulator.

use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};

pub type NVec3 = Vector3<f64>;
pub type Orientation = UnitQuaternion<f64>;

/// Lengths below this are treated as zero
pub const LENGTH_EPSILON: f64 = 1e-12;

/// Unit vector along `v`, or the zero vector when `|v|` is ~0
pub fn normalize_or_zero(v: &NVec3) -> NVec3 {
    v.try_normalize(LENGTH_EPSILON).unwrap_or_else(NVec3::zeros)
}

/// Euclidean distance between two points
pub fn distance(a: &NVec3, b: &NVec3) -> f64 {
    (a - b).norm()
}

/// In-place `acc += v`. The only mutating helper in this module.
pub fn accumulate(acc: &mut NVec3, v: &NVec3) {
    *acc += v;
}

/// Rotation of `angle` radians about `axis` (need not be unit length)
///
/// A zero-length axis yields the identity rotation.
pub fn axis_angle(axis: &NVec3, angle: f64) -> Orientation {
    match Unit::try_new(*axis, LENGTH_EPSILON) {
        Some(unit_axis) => UnitQuaternion::from_axis_angle(&unit_axis, angle),
        None => UnitQuaternion::identity(),
    }
}

/// Hamilton product `q1 * q2`: apply `q2` first, then `q1`
pub fn compose(q1: &Orientation, q2: &Orientation) -> Orientation {
    q1 * q2
}

/// Small rotation accumulated by spinning at `angular_velocity` for `dt`
///
/// The axis is the direction of `angular_velocity` and the angle is
/// `|angular_velocity| * dt`.
pub fn spin_increment(angular_velocity: &NVec3, dt: f64) -> Orientation {
    axis_angle(angular_velocity, angular_velocity.norm() * dt)
}

/// Rotate `point` about `pivot` by `rotation`
pub fn rotate_about(point: &NVec3, pivot: &NVec3, rotation: &Orientation) -> NVec3 {
    pivot + rotation * (point - pivot)
}

/// Renormalize `q` when its norm has drifted more than `tolerance` from 1
pub fn renormalize(q: &Orientation, tolerance: f64) -> Orientation {
    let raw: &Quaternion<f64> = q.quaternion();
    let norm = raw.norm();
    if (norm - 1.0).abs() > tolerance && norm > LENGTH_EPSILON {
        UnitQuaternion::new_normalize(*raw)
    } else {
        *q
    }
}

/// Deviation of `q` from unit norm
pub fn norm_drift(q: &Orientation) -> f64 {
    (q.quaternion().norm() - 1.0).abs()
}
