//! Post-step scan for terminal conditions
//!
//! Ejection (a body faster than the ejection threshold) is checked before
//! collision (two bodies closer than the sum of their radii), so when both
//! hold in the same tick the verdict is `Ejected`.

use std::fmt;

use crate::simulation::math;
use crate::simulation::params::Parameters;
use crate::simulation::states::System;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ejected { body: usize },
    Collided { first: usize, second: usize },
}

impl Verdict {
    /// Status line shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Ejected { .. } => "Body Ejected - Simulation Stopped",
            Verdict::Collided { .. } => "Bodies Collided - Simulation Stopped",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Index of the first body whose speed exceeds `threshold`
pub fn find_ejection(sys: &System, threshold: f64) -> Option<usize> {
    sys.bodies().iter().position(|b| b.speed() > threshold)
}

/// First unordered pair whose centers are closer than the sum of their radii
pub fn find_collision(sys: &System) -> Option<(usize, usize)> {
    let bodies = sys.bodies();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let d = math::distance(&bodies[i].position, &bodies[j].position);
            if d < bodies[i].radius() + bodies[j].radius() {
                return Some((i, j));
            }
        }
    }
    None
}

/// Terminal verdict for the current state, if any
pub fn evaluate(sys: &System, params: &Parameters) -> Option<Verdict> {
    if let Some(body) = find_ejection(sys, params.ejection_speed) {
        return Some(Verdict::Ejected { body });
    }
    find_collision(sys).map(|(first, second)| Verdict::Collided { first, second })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::math::NVec3;
    use crate::simulation::states::BodyInit;

    fn pair(separation: f64, speed: f64) -> System {
        let mk = |x: f64, vx: f64| BodyInit {
            position: NVec3::new(x, 0.0, 0.0),
            velocity: NVec3::new(vx, 0.0, 0.0),
            size: 1.0,
            angular_velocity: NVec3::zeros(),
        };
        System::from_inits(&[mk(0.0, speed), mk(separation, 0.0)]).unwrap()
    }

    #[test]
    fn quiet_system_has_no_verdict() {
        assert_eq!(evaluate(&pair(3.0, 1.0), &Parameters::default()), None);
    }

    #[test]
    fn ejection_wins_over_collision() {
        let v = evaluate(&pair(0.5, 6.0), &Parameters::default());
        assert_eq!(v, Some(Verdict::Ejected { body: 0 }));
    }

    #[test]
    fn collision_reports_pair() {
        let v = evaluate(&pair(0.5, 0.0), &Parameters::default());
        assert_eq!(v, Some(Verdict::Collided { first: 0, second: 1 }));
        assert_eq!(v.unwrap().message(), "Bodies Collided - Simulation Stopped");
    }
}
