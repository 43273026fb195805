//! System-level aggregates recomputed every tick
//!
//! Center of mass position and velocity, plus the framing radius a viewer
//! needs to keep every body on screen.

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::math::{self, NVec3};
use crate::simulation::states::System;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemMetrics {
    pub center_of_mass: NVec3,
    pub center_of_mass_velocity: NVec3,
    pub framing_radius: f64, // max over bodies of |x - com| + size
}

impl SystemMetrics {
    pub fn measure(sys: &System) -> Result<Self> {
        let center_of_mass = center_of_mass(sys)?;
        Ok(Self {
            center_of_mass,
            center_of_mass_velocity: center_of_mass_velocity(sys)?,
            framing_radius: framing_radius(sys, &center_of_mass),
        })
    }
}

pub fn total_mass(sys: &System) -> f64 {
    sys.bodies().iter().map(|b| b.mass()).sum()
}

fn mass_weighted_mean(sys: &System, quantity: impl Fn(usize) -> NVec3) -> Result<NVec3> {
    let m_total = total_mass(sys);
    if !(m_total > 0.0) {
        return Err(SimulationError::DegenerateConfiguration(format!(
            "total mass must be positive, got {m_total}"
        )));
    }
    let weighted = sys
        .bodies()
        .iter()
        .enumerate()
        .fold(NVec3::zeros(), |acc, (i, b)| acc + quantity(i) * b.mass());
    Ok(weighted / m_total)
}

/// Sum(m_i * x_i) / Sum(m_i)
pub fn center_of_mass(sys: &System) -> Result<NVec3> {
    let bodies = sys.bodies();
    mass_weighted_mean(sys, |i| bodies[i].position)
}

/// Sum(m_i * v_i) / Sum(m_i)
pub fn center_of_mass_velocity(sys: &System) -> Result<NVec3> {
    let bodies = sys.bodies();
    mass_weighted_mean(sys, |i| bodies[i].velocity)
}

/// Largest distance from `center` to a body surface, padded by the body size
pub fn framing_radius(sys: &System, center: &NVec3) -> f64 {
    sys.bodies()
        .iter()
        .map(|b| math::distance(&b.position, center) + b.size())
        .fold(0.0, f64::max)
}
