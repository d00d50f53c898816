//! Conserved-quantity monitors for an ensemble.
//!
//! Read-only helpers used by tests and the CLI summary to watch momentum and
//! energy drift over a run.

use super::states::{Body, NVec2};

/// Total linear momentum `sum m_i v_i`
pub fn total_momentum(bodies: &[Body]) -> NVec2 {
    bodies.iter().fold(NVec2::zeros(), |p, b| p + b.momentum())
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}

/// Pairwise gravitational potential energy `-G m_i m_j / r`.
/// Coincident pairs are skipped, matching the force law.
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mut u = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let r = (bj.x - bi.x).norm();
            if r > 0.0 {
                u -= g * bi.m * bj.m / r;
            }
        }
    }
    u
}

pub fn total_energy(bodies: &[Body], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// Mass-weighted mean position, `None` if the ensemble has no mass
pub fn center_of_mass(bodies: &[Body]) -> Option<NVec2> {
    let total: f64 = bodies.iter().map(|b| b.m).sum();
    if total <= 0.0 {
        return None;
    }
    let weighted = bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.m * b.x);
    Some(weighted / total)
}
