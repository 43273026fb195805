pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use simulation::math::{NVec3, Orientation};
pub use simulation::states::{Axis, Body, BodyInit, System};
pub use simulation::params::Parameters;
pub use simulation::error::{Result, SimulationError};
pub use simulation::forces::{ForceLaw, ForceSet, NewtonianGravity};
pub use simulation::integrator::semi_implicit_step;
pub use simulation::metrics::SystemMetrics;
pub use simulation::stability::Verdict;
pub use simulation::scenario::{CustomBody, InitialConditions};
pub use simulation::scheduler::{CancelHandle, RepeatingTask};
pub use simulation::clock::{BodySnapshot, RunState, SimulationClock, Snapshot, TickOutcome};

pub use configuration::config::{ScenarioConfig, ParametersConfig, BodyConfig, RunConfig, StartMode};

pub use visualization::console::render_overlay;
#[cfg(feature = "viewer")]
pub use visualization::viewer::run_viewer;
