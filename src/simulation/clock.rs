//! Simulation context and lifecycle
//!
//! [`SimulationClock`] owns everything a run needs: the bodies, the force
//! set, the parameters, the saved start snapshot, the run state and the last
//! verdict. One [`SimulationClock::tick`] runs
//! forces -> integration -> metrics -> stability, and either advances the
//! run or ends it with a [`Verdict`].
//!
//! ```text
//!   Idle --start--> Running --stop / verdict--> Stopped
//!    ^                 |                           |
//!    +------reset------+------------reset----------+
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::semi_implicit_step;
use crate::simulation::math::{NVec3, Orientation};
use crate::simulation::metrics::SystemMetrics;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::InitialConditions;
use crate::simulation::stability::{self, Verdict};
use crate::simulation::states::{Axis, BodyInit, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Result of one call to [`SimulationClock::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// State advanced by one step and the run continues
    Advanced(SystemMetrics),
    /// State advanced and the stability check ended the run
    Terminated(Verdict),
    /// Not started yet; nothing changed
    Idle,
    /// Already stopped; nothing changed
    Halted,
}

/// Read-only view of one body for renderers and telemetry
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub position: NVec3,
    pub size: f64,
    pub orientation: Orientation,
    pub speed: f64,
    pub spin_rate: f64,
}

/// Read-only view of the whole run after the latest tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub bodies: Vec<BodySnapshot>,
    pub metrics: SystemMetrics,
    pub state: RunState,
    pub verdict: Option<Verdict>,
    pub ticks: u64,
}

pub struct SimulationClock {
    system: System,
    forces: ForceSet,
    params: Parameters,
    start: Vec<BodyInit>, // last applied initial conditions
    state: RunState,
    verdict: Option<Verdict>,
    metrics: SystemMetrics,
    rng: StdRng,
    ticks: u64, // steps since the last reset
}

impl SimulationClock {
    /// Gravity-driven clock seeded from `conditions`, in `Idle`
    pub fn new(params: Parameters, conditions: &InitialConditions) -> Result<Self> {
        let forces = ForceSet::gravity(&params);
        Self::with_forces(params, forces, conditions)
    }

    /// Clock with a caller-supplied force set
    pub fn with_forces(
        params: Parameters,
        forces: ForceSet,
        conditions: &InitialConditions,
    ) -> Result<Self> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(params.seed);
        let start = conditions.build(&mut rng)?;
        let system = System::from_inits(&start)?;
        let metrics = SystemMetrics::measure(&system)?;
        info!(mode = conditions.name(), bodies = system.len(), "simulation initialized");
        Ok(Self {
            system,
            forces,
            params,
            start,
            state: RunState::Idle,
            verdict: None,
            metrics,
            rng,
            ticks: 0,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn metrics(&self) -> &SystemMetrics {
        &self.metrics
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The start values `reset` restores
    pub fn start_snapshot(&self) -> &[BodyInit] {
        &self.start
    }

    /// Idle -> Running. No-op when already running; a stopped run needs `reset`.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            RunState::Idle => {
                self.state = RunState::Running;
                info!("simulation started");
                Ok(())
            }
            RunState::Running => Ok(()),
            RunState::Stopped => Err(SimulationError::InvalidTransition {
                from: self.state,
                command: "start",
            }),
        }
    }

    /// Running -> Stopped without a verdict
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
            info!(ticks = self.ticks, "simulation stopped");
        }
    }

    /// Any state -> Idle with bodies restored from the start snapshot
    pub fn reset(&mut self) -> Result<()> {
        self.system = System::from_inits(&self.start)?;
        self.metrics = SystemMetrics::measure(&self.system)?;
        self.state = RunState::Idle;
        self.verdict = None;
        self.ticks = 0;
        info!("simulation reset");
        Ok(())
    }

    /// Seed new bodies, save them as the reset snapshot and return to Idle
    ///
    /// On error the current run is left untouched.
    pub fn apply_initial_conditions(&mut self, conditions: &InitialConditions) -> Result<()> {
        let start = conditions.build(&mut self.rng)?;
        let system = System::from_inits(&start)?;
        let metrics = SystemMetrics::measure(&system)?;
        self.start = start;
        self.system = system;
        self.metrics = metrics;
        self.state = RunState::Idle;
        self.verdict = None;
        self.ticks = 0;
        info!(mode = conditions.name(), bodies = self.system.len(), "initial conditions applied");
        Ok(())
    }

    /// Live diameter edit; mass and inertia follow. Run state is untouched.
    pub fn set_body_size(&mut self, index: usize, size: f64) -> Result<()> {
        let res = self.system.body_mut(index).and_then(|b| b.update_size(size));
        self.after_edit(res, index)
    }

    /// Live single-axis position edit. Run state is untouched.
    pub fn set_body_position_axis(&mut self, index: usize, axis: Axis, value: f64) -> Result<()> {
        let res = self
            .system
            .body_mut(index)
            .and_then(|b| b.set_position_axis(axis, value));
        self.after_edit(res, index)
    }

    fn after_edit(&mut self, res: Result<()>, index: usize) -> Result<()> {
        match res {
            Ok(()) => {
                self.metrics = SystemMetrics::measure(&self.system)?;
                debug!(index, "body edited");
                Ok(())
            }
            Err(e) => {
                warn!(index, error = %e, "rejected body edit");
                Err(e)
            }
        }
    }

    /// One fixed step: forces -> integrator -> metrics -> stability
    ///
    /// Only advances while `Running`. A verdict moves the run to `Stopped`.
    /// A step that would leave non-finite state is rolled back, stops the
    /// run and fails with `DegenerateConfiguration`.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        match self.state {
            RunState::Idle => return Ok(TickOutcome::Idle),
            RunState::Stopped => return Ok(TickOutcome::Halted),
            RunState::Running => {}
        }

        let previous = self.system.clone();
        let stepped = semi_implicit_step(&mut self.system, &self.forces, &self.params)
            .and_then(|()| {
                if self.system.is_finite() {
                    Ok(())
                } else {
                    Err(SimulationError::DegenerateConfiguration(format!(
                        "non-finite body state after tick {}",
                        self.ticks + 1
                    )))
                }
            });
        if let Err(e) = stepped {
            self.system = previous;
            self.state = RunState::Stopped;
            warn!(ticks = self.ticks, error = %e, "tick rolled back");
            return Err(e);
        }
        self.metrics = SystemMetrics::measure(&self.system)?;
        self.ticks += 1;

        if let Some(verdict) = stability::evaluate(&self.system, &self.params) {
            self.state = RunState::Stopped;
            self.verdict = Some(verdict);
            warn!(ticks = self.ticks, ?verdict, "{}", verdict.message());
            return Ok(TickOutcome::Terminated(verdict));
        }

        debug!(
            tick = self.ticks,
            com_x = self.metrics.center_of_mass.x,
            com_y = self.metrics.center_of_mass.y,
            com_z = self.metrics.center_of_mass.z,
            "tick"
        );
        Ok(TickOutcome::Advanced(self.metrics))
    }

    pub fn snapshot(&self) -> Snapshot {
        let bodies = self
            .system
            .bodies()
            .iter()
            .map(|b| BodySnapshot {
                position: b.position,
                size: b.size(),
                orientation: b.orientation,
                speed: b.speed(),
                spin_rate: b.spin_rate(),
            })
            .collect();
        Snapshot {
            bodies,
            metrics: self.metrics,
            state: self.state,
            verdict: self.verdict,
            ticks: self.ticks,
        }
    }
}
