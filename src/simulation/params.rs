//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` and fixed step size `dt`,
//! - ejection speed threshold,
//! - minimum separation used to keep forces finite,
//! - orientation renormalization tolerance,
//! - random seed for the randomized preset

use crate::simulation::error::{Result, SimulationError};

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt: f64, // fixed step size
    pub ejection_speed: f64, // speed above which a body counts as ejected
    pub min_separation: f64, // distance floor for the force law
    pub orientation_tolerance: f64, // allowed |q| drift before renormalizing
    pub seed: u64, // deterministic seed for random starts
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 1.0,
            dt: 0.01,
            ejection_speed: 5.0,
            min_separation: 1e-9,
            orientation_tolerance: 1e-9,
            seed: 42,
        }
    }
}

impl Parameters {
    /// Reject non-finite or non-positive settings
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("G", self.G),
            ("dt", self.dt),
            ("ejection_speed", self.ejection_speed),
            ("min_separation", self.min_separation),
            ("orientation_tolerance", self.orientation_tolerance),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidParameter(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
