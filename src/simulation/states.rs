//! Core state types for the three-body simulation.
//!
//! - `Body`: one unit-density sphere with translational and rotational state.
//!   Mass and moment of inertia are derived from `size` and can only change
//!   together with it.
//! - `BodyInit`: the kinematic start values for one body, kept by the clock
//!   so a reset can restore them.
//! - `System`: the ordered, fixed-cardinality list of bodies.

use std::f64::consts::PI;
use std::fmt;

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::math::{NVec3, Orientation};

/// Mass of a unit-density sphere of diameter `size`
pub fn sphere_mass(size: f64) -> f64 {
    let radius = size / 2.0;
    (4.0 / 3.0) * PI * radius.powi(3)
}

/// Moment of inertia of a solid sphere about its center
pub fn sphere_moment_of_inertia(mass: f64, size: f64) -> f64 {
    let radius = size / 2.0;
    (2.0 / 5.0) * mass * radius.powi(2)
}

/// Largest accepted diameter
/// Keeps mass, inertia and pairwise forces well inside `f64` range.
pub const MAX_SIZE: f64 = 1e6;

pub(crate) fn check_size(size: f64) -> Result<()> {
    if size.is_finite() && size > 0.0 && size <= MAX_SIZE {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "size must be finite, positive and at most {MAX_SIZE}, got {size}"
        )))
    }
}

pub(crate) fn check_finite(name: &str, v: &NVec3) -> Result<()> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{name} must be finite, got ({}, {}, {})",
            v.x, v.y, v.z
        )))
    }
}

/// Cartesian axis selector for single-component edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Start values for one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInit {
    pub position: NVec3,
    pub velocity: NVec3,
    pub size: f64,
    pub angular_velocity: NVec3,
}

impl BodyInit {
    pub fn validate(&self) -> Result<()> {
        check_finite("position", &self.position)?;
        check_finite("velocity", &self.velocity)?;
        check_finite("angular velocity", &self.angular_velocity)?;
        check_size(self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: NVec3, // world-frame position
    pub velocity: NVec3, // world-frame velocity
    pub angular_velocity: NVec3, // axis * rate
    pub orientation: Orientation, // accumulated spin
    size: f64, // diameter
    mass: f64, // derived from size
    moment_of_inertia: f64, // derived from mass and size
}

impl Body {
    /// Build a body at rest orientation from validated start values
    pub fn new(init: &BodyInit) -> Result<Self> {
        init.validate()?;
        let mass = sphere_mass(init.size);
        Ok(Self {
            position: init.position,
            velocity: init.velocity,
            angular_velocity: init.angular_velocity,
            orientation: Orientation::identity(),
            size: init.size,
            mass,
            moment_of_inertia: sphere_moment_of_inertia(mass, init.size),
        })
    }

    /// Overwrite kinematic state and size, recomputing mass and inertia
    ///
    /// Orientation is left untouched. On error the body is unchanged.
    pub fn set_properties(
        &mut self,
        position: NVec3,
        velocity: NVec3,
        size: f64,
        angular_velocity: NVec3,
    ) -> Result<()> {
        let init = BodyInit { position, velocity, size, angular_velocity };
        init.validate()?;
        self.position = position;
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
        self.apply_size(size);
        Ok(())
    }

    /// Change the diameter without touching kinematic state
    pub fn update_size(&mut self, size: f64) -> Result<()> {
        check_size(size)?;
        self.apply_size(size);
        Ok(())
    }

    /// Overwrite one position component
    pub fn set_position_axis(&mut self, axis: Axis, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(SimulationError::InvalidParameter(format!(
                "position {axis} must be finite, got {value}"
            )));
        }
        self.position[axis.index()] = value;
        Ok(())
    }

    fn apply_size(&mut self, size: f64) {
        self.size = size;
        self.mass = sphere_mass(size);
        self.moment_of_inertia = sphere_moment_of_inertia(self.mass, size);
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn spin_rate(&self) -> f64 {
        self.angular_velocity.norm()
    }

    /// True when every kinematic component is finite
    pub fn is_finite(&self) -> bool {
        let finite = |v: &NVec3| v.iter().all(|c| c.is_finite());
        finite(&self.position)
            && finite(&self.velocity)
            && finite(&self.angular_velocity)
            && self.orientation.quaternion().coords.iter().all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    bodies: Vec<Body>, // fixed for the lifetime of the system
}

impl System {
    /// Smallest body count that still has an interaction
    pub const MIN_BODIES: usize = 2;

    pub fn new(bodies: Vec<Body>) -> Result<Self> {
        if bodies.len() < Self::MIN_BODIES {
            return Err(SimulationError::InvalidParameter(format!(
                "a system needs at least {} bodies, got {}",
                Self::MIN_BODIES,
                bodies.len()
            )));
        }
        Ok(Self { bodies })
    }

    pub fn from_inits(inits: &[BodyInit]) -> Result<Self> {
        let bodies = inits.iter().map(Body::new).collect::<Result<Vec<_>>>()?;
        Self::new(bodies)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn is_finite(&self) -> bool {
        self.bodies.iter().all(Body::is_finite)
    }

    /// Mutable view of the bodies; the count itself cannot change
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Result<&Body> {
        let len = self.bodies.len();
        self.bodies
            .get(index)
            .ok_or(SimulationError::IndexOutOfRange { index, len })
    }

    pub fn body_mut(&mut self, index: usize) -> Result<&mut Body> {
        let len = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(SimulationError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_init() -> BodyInit {
        BodyInit {
            position: NVec3::new(1.0, 2.0, 3.0),
            velocity: NVec3::zeros(),
            size: 1.0,
            angular_velocity: NVec3::zeros(),
        }
    }

    #[test]
    fn unit_sphere_mass_and_inertia() {
        let b = Body::new(&unit_init()).unwrap();
        assert_relative_eq!(b.mass(), PI / 6.0, epsilon = 1e-12);
        assert_relative_eq!(b.moment_of_inertia(), 0.4 * (PI / 6.0) * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut b = Body::new(&unit_init()).unwrap();
        b.update_size(1.7).unwrap();
        let (m, i) = (b.mass(), b.moment_of_inertia());
        b.update_size(1.7).unwrap();
        assert_eq!(b.mass(), m);
        assert_eq!(b.moment_of_inertia(), i);
    }

    #[test]
    fn rejected_size_leaves_body_unchanged() {
        let mut b = Body::new(&unit_init()).unwrap();
        let before = b.clone();
        assert!(b.update_size(0.0).is_err());
        assert!(b.update_size(-1.0).is_err());
        assert!(b.update_size(f64::INFINITY).is_err());
        assert_eq!(b, before);
    }

    #[test]
    fn oversized_body_is_rejected() {
        let huge = BodyInit { size: 1e60, ..unit_init() };
        assert!(matches!(Body::new(&huge), Err(SimulationError::InvalidParameter(_))));
        let mut b = Body::new(&BodyInit { size: MAX_SIZE, ..unit_init() }).unwrap();
        assert!(b.mass().is_finite() && b.moment_of_inertia().is_finite());
        assert!(b.update_size(MAX_SIZE * 2.0).is_err());
        assert_eq!(b.size(), MAX_SIZE);
    }

    #[test]
    fn non_finite_kinematics_are_detected() {
        let mut b = Body::new(&unit_init()).unwrap();
        assert!(b.is_finite());
        b.velocity.x = f64::INFINITY;
        assert!(!b.is_finite());
        let ok = Body::new(&unit_init()).unwrap();
        let sys = System::new(vec![ok, b]).unwrap();
        assert!(!sys.is_finite());
    }

    #[test]
    fn set_properties_rejects_nan_velocity_atomically() {
        let mut b = Body::new(&unit_init()).unwrap();
        let before = b.clone();
        let res = b.set_properties(
            NVec3::new(9.0, 9.0, 9.0),
            NVec3::new(f64::NAN, 0.0, 0.0),
            2.0,
            NVec3::zeros(),
        );
        assert!(matches!(res, Err(SimulationError::InvalidParameter(_))));
        assert_eq!(b, before);
    }

    #[test]
    fn set_position_axis_touches_one_component() {
        let mut b = Body::new(&unit_init()).unwrap();
        b.set_position_axis(Axis::Y, -4.0).unwrap();
        assert_eq!(b.position, NVec3::new(1.0, -4.0, 3.0));
        assert!(b.set_position_axis(Axis::Z, f64::NAN).is_err());
    }

    #[test]
    fn system_needs_two_bodies() {
        let b = Body::new(&unit_init()).unwrap();
        assert!(System::new(vec![b.clone()]).is_err());
        let sys = System::new(vec![b.clone(), b]).unwrap();
        assert!(matches!(
            sys.body(5),
            Err(SimulationError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }
}
