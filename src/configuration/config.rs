//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! run. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and thresholds (all optional)
//! - [`StartMode`]        – which initial conditions to apply
//! - [`BodyConfig`]       – position and size per body, for `custom` starts
//! - [`RunConfig`]        – how long to run headless and how often to report
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A custom three-body scenario matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 1.0                  # gravitational constant
//!   dt: 0.01                # fixed step size
//!   ejection_speed: 5.0     # speed that ends the run
//!   seed: 42                # seed for `random` starts
//!
//! start: custom             # default | random | custom
//!
//! bodies:                   # only read for `custom`
//!   - position: [ -3.0, 0.0, 0.0 ]
//!     size: 1.0
//!   - position: [  3.0, 0.0, 0.0 ]
//!     size: 1.0
//!   - position: [  0.0, 4.0, 0.0 ]
//!     size: 1.5
//!
//! run:
//!   max_ticks: 5000
//!   report_every: 250
//! ```
//!
//! Missing fields fall back to [`Parameters::default`] and the `run` defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::error::Result;
use crate::simulation::math::NVec3;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::{CustomBody, InitialConditions};

/// Overrides for [`Parameters`]; unset fields keep the defaults
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: Option<f64>, // gravitational constant
    pub dt: Option<f64>, // fixed step size
    pub ejection_speed: Option<f64>, // ejection threshold
    pub min_separation: Option<f64>, // distance floor for the force law
    pub orientation_tolerance: Option<f64>, // quaternion drift tolerance
    pub seed: Option<u64>, // deterministic seed for random starts
}

impl ParametersConfig {
    pub fn into_parameters(self) -> Parameters {
        let d = Parameters::default();
        Parameters {
            G: self.G.unwrap_or(d.G),
            dt: self.dt.unwrap_or(d.dt),
            ejection_speed: self.ejection_speed.unwrap_or(d.ejection_speed),
            min_separation: self.min_separation.unwrap_or(d.min_separation),
            orientation_tolerance: self.orientation_tolerance.unwrap_or(d.orientation_tolerance),
            seed: self.seed.unwrap_or(d.seed),
        }
    }
}

/// Which initial conditions to apply
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    #[default]
    Default,
    Random,
    Custom,
}

/// Start values for one body in a `custom` scenario
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub position: [f64; 3], // initial position in simulation units
    pub size: f64, // diameter; drives mass, inertia and collision radius
}

/// Headless run settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub max_ticks: u64, // frames to deliver before giving up
    pub report_every: u64, // telemetry interval in ticks, 0 = never
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: 10_000,
            report_every: 100,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // physical and numerical settings
    pub start: StartMode, // initial-conditions mode
    pub bodies: Vec<BodyConfig>, // custom bodies
    pub run: RunConfig, // headless run settings
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn parameters(&self) -> Parameters {
        self.parameters.clone().into_parameters()
    }

    /// Initial conditions for `start`; validation happens when they are built
    pub fn initial_conditions(&self) -> InitialConditions {
        match self.start {
            StartMode::Default => InitialConditions::Default,
            StartMode::Random => InitialConditions::Random,
            StartMode::Custom => InitialConditions::Custom(
                self.bodies
                    .iter()
                    .map(|b| CustomBody {
                        position: NVec3::from(b.position),
                        size: b.size,
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg.start, StartMode::Default);
        assert_eq!(cfg.parameters(), Parameters::default());
        assert_eq!(cfg.run.max_ticks, 10_000);
    }

    #[test]
    fn custom_bodies_are_read() {
        let yaml = "
parameters:
  G: 2.0
start: custom
bodies:
  - position: [1.0, 2.0, 3.0]
    size: 0.5
  - position: [-1.0, 0.0, 0.0]
    size: 1.0
";
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.parameters().G, 2.0);
        assert_eq!(cfg.parameters().dt, 0.01);
        match cfg.initial_conditions() {
            InitialConditions::Custom(bodies) => {
                assert_eq!(bodies.len(), 2);
                assert_eq!(bodies[0].position, NVec3::new(1.0, 2.0, 3.0));
                assert_eq!(bodies[0].size, 0.5);
            }
            other => panic!("expected custom start, got {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(ScenarioConfig::from_yaml_str("start: chaotic").is_err());
    }
}
