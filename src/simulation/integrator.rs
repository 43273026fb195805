//! Fixed-step time integration for the three-body system
//!
//! One step runs three stages in a fixed order:
//! 1. linear semi-implicit Euler (velocity from force, then position from
//!    the updated velocity),
//! 2. per-body spin: torque -> angular velocity -> orientation,
//! 3. rigid rotation of each body's position about the center of mass by
//!    its own angular velocity.
//!
//! Forces come from the configuration at the start of the step. Torques and
//! the pivot are taken after the linear stage, matching the tick pipeline.

use crate::simulation::error::Result;
use crate::simulation::forces::ForceSet;
use crate::simulation::math::{self, NVec3};
use crate::simulation::metrics;
use crate::simulation::params::Parameters;
use crate::simulation::states::System;

/// Stage 1: v += (F / m) dt, then x += v dt
pub fn linear_step(sys: &mut System, forces: &[NVec3], dt: f64) {
    for (b, f) in sys.bodies_mut().iter_mut().zip(forces.iter()) {
        // Kick: v_n+1 = v_n + dt * a_n
        let a = *f / b.mass();
        b.velocity += a * dt;
        // Drift with the updated velocity: x_n+1 = x_n + dt * v_n+1
        b.position += b.velocity * dt;
    }
}

/// Stage 2: integrate torque into angular velocity, then orientation
///
/// `orientation = orientation * spin_increment(angular_velocity, dt)`,
/// renormalized when the norm drifts past `params.orientation_tolerance`.
pub fn spin_step(sys: &mut System, forces: &ForceSet, params: &Parameters) {
    let dt = params.dt;
    // Torques depend on positions only, so gather them before mutating spins
    let torques = forces.compute_torques(sys);
    for (b, torque) in sys.bodies_mut().iter_mut().zip(torques.iter()) {
        let alpha = *torque / b.moment_of_inertia();
        b.angular_velocity += alpha * dt;
        let dq = math::spin_increment(&b.angular_velocity, dt);
        let composed = math::compose(&b.orientation, &dq);
        b.orientation = math::renormalize(&composed, params.orientation_tolerance);
    }
}

/// Stage 3: rotate each position about `pivot` by angle |w| dt around w
pub fn rotate_about_center(sys: &mut System, pivot: &NVec3, dt: f64) {
    for b in sys.bodies_mut().iter_mut() {
        let rotation = math::spin_increment(&b.angular_velocity, dt);
        b.position = math::rotate_about(&b.position, pivot, &rotation);
    }
}

/// Advance the system by one fixed step `params.dt`
/// Forces are evaluated once, from the state at the start of the step.
pub fn semi_implicit_step(sys: &mut System, forces: &ForceSet, params: &Parameters) -> Result<()> {
    let dt = params.dt;

    // F_n from x_n
    let f = forces.compute_forces(sys);
    linear_step(sys, &f, dt);

    spin_step(sys, forces, params);

    // Pivot is the center of mass after the linear and spin stages
    let com = metrics::center_of_mass(sys)?;
    rotate_about_center(sys, &com, dt);

    Ok(())
}
