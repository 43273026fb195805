//! Text telemetry overlay
//!
//! Formats a [`Snapshot`] the way the status panel shows it: per body
//! position, speed and rotation speed, then the center of mass.

use std::fmt::Write;

use crate::simulation::clock::Snapshot;
use crate::simulation::math::NVec3;

fn fmt_vec(v: &NVec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// Multi-line overlay text for one snapshot
pub fn render_overlay(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for (i, b) in snapshot.bodies.iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(out, "Star {}:", i + 1);
        let _ = writeln!(out, "  Position: {}", fmt_vec(&b.position));
        let _ = writeln!(out, "  Speed: {:.2}", b.speed);
        let _ = writeln!(out, "  Rotation Speed: {:.2}", b.spin_rate);
    }
    let m = &snapshot.metrics;
    let _ = writeln!(out, "Center of Mass Position: {}", fmt_vec(&m.center_of_mass));
    let _ = writeln!(out, "Center of Mass Speed: {:.2}", m.center_of_mass_velocity.norm());
    if let Some(verdict) = snapshot.verdict {
        let _ = writeln!(out, "{}", verdict.message());
    }
    out
}
