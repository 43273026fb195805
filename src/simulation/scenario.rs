//! Initial conditions for a run
//!
//! Three ways to seed the bodies:
//! - `Default`: the fixed three-body preset,
//! - `Random`: bounded random values drawn from the caller's RNG,
//! - `Custom`: externally supplied position and size per body, at rest.
//!
//! Each produces a validated list of [`BodyInit`] that the clock turns into a
//! `System` and keeps as the reset snapshot.

use rand::Rng;

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::math::NVec3;
use crate::simulation::states::{BodyInit, System};

/// Number of bodies in the reference scenario
pub const BODY_COUNT: usize = 3;

/// Half-width of the random position box
pub const RANDOM_POSITION_EXTENT: f64 = 4.0;
/// Half-width of the random velocity box
pub const RANDOM_VELOCITY_EXTENT: f64 = 1.0;
/// Random diameters are drawn from `[min, max)`
pub const RANDOM_SIZE_RANGE: (f64, f64) = (0.5, 2.0);
/// Half-width of the random angular velocity box
pub const RANDOM_SPIN_EXTENT: f64 = 0.5;

/// Position and size for one body in a custom start
#[derive(Debug, Clone, PartialEq)]
pub struct CustomBody {
    pub position: NVec3,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InitialConditions {
    Default,
    Random,
    Custom(Vec<CustomBody>),
}

impl InitialConditions {
    /// Produce validated start values; `rng` is only drawn from for `Random`
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Vec<BodyInit>> {
        let inits = match self {
            InitialConditions::Default => default_preset(),
            InitialConditions::Random => random_preset(rng, BODY_COUNT),
            InitialConditions::Custom(bodies) => custom_preset(bodies),
        };
        if inits.len() < System::MIN_BODIES {
            return Err(SimulationError::InvalidParameter(format!(
                "initial conditions need at least {} bodies, got {}",
                System::MIN_BODIES,
                inits.len()
            )));
        }
        for init in &inits {
            init.validate()?;
        }
        Ok(inits)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitialConditions::Default => "default",
            InitialConditions::Random => "random",
            InitialConditions::Custom(_) => "custom",
        }
    }
}

/// Figure-of-three preset: unit spheres on a triangle with tangential speeds
pub fn default_preset() -> Vec<BodyInit> {
    vec![
        BodyInit {
            position: NVec3::new(-5.0, 0.0, 0.0),
            velocity: NVec3::new(0.0, 1.5, 0.0),
            size: 1.0,
            angular_velocity: NVec3::new(0.0, 0.5, 0.0),
        },
        BodyInit {
            position: NVec3::new(5.0, 0.0, 0.0),
            velocity: NVec3::new(0.0, -1.5, 0.0),
            size: 1.0,
            angular_velocity: NVec3::new(0.0, -0.5, 0.0),
        },
        BodyInit {
            position: NVec3::new(0.0, 5.0, 0.0),
            velocity: NVec3::new(1.5, 0.0, 0.0),
            size: 1.0,
            angular_velocity: NVec3::new(0.5, 0.0, 0.0),
        },
    ]
}

fn symmetric<R: Rng>(rng: &mut R, extent: f64) -> NVec3 {
    NVec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

/// `n` bodies with every component drawn uniformly from the fixed ranges
pub fn random_preset<R: Rng>(rng: &mut R, n: usize) -> Vec<BodyInit> {
    (0..n)
        .map(|_| BodyInit {
            position: symmetric(rng, RANDOM_POSITION_EXTENT),
            velocity: symmetric(rng, RANDOM_VELOCITY_EXTENT),
            size: rng.gen_range(RANDOM_SIZE_RANGE.0..RANDOM_SIZE_RANGE.1),
            angular_velocity: symmetric(rng, RANDOM_SPIN_EXTENT),
        })
        .collect()
}

/// Supplied positions and sizes, with linear and angular velocity zeroed
pub fn custom_preset(bodies: &[CustomBody]) -> Vec<BodyInit> {
    bodies
        .iter()
        .map(|b| BodyInit {
            position: b.position,
            velocity: NVec3::zeros(),
            size: b.size,
            angular_velocity: NVec3::zeros(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            for b in InitialConditions::Random.build(&mut rng).unwrap() {
                assert!(b.position.iter().all(|c| c.abs() <= RANDOM_POSITION_EXTENT));
                assert!(b.velocity.iter().all(|c| c.abs() <= RANDOM_VELOCITY_EXTENT));
                assert!(b.angular_velocity.iter().all(|c| c.abs() <= RANDOM_SPIN_EXTENT));
                assert!(b.size >= RANDOM_SIZE_RANGE.0 && b.size < RANDOM_SIZE_RANGE.1);
            }
        }
    }

    #[test]
    fn same_seed_same_bodies() {
        let a = InitialConditions::Random.build(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = InitialConditions::Random.build(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_start_is_at_rest() {
        let bodies = vec![
            CustomBody { position: NVec3::new(1.0, 0.0, 0.0), size: 1.0 },
            CustomBody { position: NVec3::new(-1.0, 0.0, 0.0), size: 0.5 },
        ];
        let inits = InitialConditions::Custom(bodies).build(&mut rand::thread_rng()).unwrap();
        assert!(inits.iter().all(|b| b.velocity == NVec3::zeros()));
        assert!(inits.iter().all(|b| b.angular_velocity == NVec3::zeros()));
    }

    #[test]
    fn custom_rejects_bad_size() {
        let bodies = vec![
            CustomBody { position: NVec3::zeros(), size: 1.0 },
            CustomBody { position: NVec3::new(3.0, 0.0, 0.0), size: -2.0 },
        ];
        let res = InitialConditions::Custom(bodies).build(&mut rand::thread_rng());
        assert!(matches!(res, Err(SimulationError::InvalidParameter(_))));
    }
}
