//! Force and torque contributors for the three-body engine
//!
//! A [`ForceLaw`] describes the force one body exerts on another.
//! [`ForceSet`] sums the registered laws over every ordered pair to give one
//! net force per body, and derives the pairwise torque used by the
//! rotational update.

use crate::simulation::math::{self, NVec3};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};

/// Pairwise force source
/// Implementations return the force acting on `on` because of `from`
pub trait ForceLaw {
    fn pair_force(&self, on: &Body, from: &Body) -> NVec3;
}

/// Collection of pairwise force laws (gravity, test probes, etc.)
/// Their contributions are summed into a single force vector per body.
/// An empty set produces zero forces and zero torques.
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Force set with Newtonian gravity configured from `params`
    pub fn gravity(params: &Parameters) -> Self {
        Self::new().with(NewtonianGravity::from_params(params))
    }

    /// Add a force law
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceLaw + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Net force on `on` from `from`, summed over all laws
    pub fn pair_force(&self, on: &Body, from: &Body) -> NVec3 {
        self.terms
            .iter()
            .fold(NVec3::zeros(), |acc, term| acc + term.pair_force(on, from))
    }

    /// Compute net forces for all bodies in `sys`
    /// - `out[i]` is overwritten with the sum over every `j != i`
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec3]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        let bodies = sys.bodies();
        for (i, bi) in bodies.iter().enumerate() {
            for (j, bj) in bodies.iter().enumerate() {
                if i != j {
                    math::accumulate(&mut out[i], &self.pair_force(bi, bj));
                }
            }
        }
    }

    /// Net force per body, in the same order as `sys`
    pub fn compute_forces(&self, sys: &System) -> Vec<NVec3> {
        let mut out = vec![NVec3::zeros(); sys.len()];
        self.accumulate_forces(sys, &mut out);
        out
    }

    /// Torque about the world origin from the pull of `b` on `a`
    ///
    /// Uses `a`'s absolute position as the lever arm, not an offset from its
    /// own center.
    pub fn compute_torque(&self, a: &Body, b: &Body) -> NVec3 {
        a.position.cross(&self.pair_force(a, b))
    }

    /// Net torque per body, summed over every other body
    pub fn compute_torques(&self, sys: &System) -> Vec<NVec3> {
        let bodies = sys.bodies();
        bodies
            .iter()
            .enumerate()
            .map(|(i, bi)| {
                let mut total = NVec3::zeros();
                for (j, bj) in bodies.iter().enumerate() {
                    if i != j {
                        math::accumulate(&mut total, &self.compute_torque(bi, bj));
                    }
                }
                total
            })
            .collect()
    }
}

/// Newtonian gravity between two spheres
/// F = G * m_a * m_b / d^2 along the direction from `on` toward `from`.
/// `d` is floored at `min_separation`, and coincident centers give a zero
/// direction, so the result is always finite.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_separation: f64, // distance floor
}

impl NewtonianGravity {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            G: params.G,
            min_separation: params.min_separation,
        }
    }
}

impl ForceLaw for NewtonianGravity {
    fn pair_force(&self, on: &Body, from: &Body) -> NVec3 {
        // r points from `on` toward `from`; gravity pulls along +r
        let r = from.position - on.position;
        let d = r.norm().max(self.min_separation);
        let magnitude = self.G * on.mass() * from.mass() / (d * d);
        math::normalize_or_zero(&r) * magnitude
    }
}
