//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size `dt`,
//! - gravitational constant `g`,
//! - how many past positions the presentation layer keeps per body

use std::ops::RangeInclusive;

/// Gravitational constant in SI units (m^3 kg^-1 s^-2)
pub const G: f64 = 6.67430e-11;

/// Default step size in seconds
pub const DEFAULT_DT: f64 = 200_000.0;

/// Default trail length in positions
pub const DEFAULT_TRAIL_LIMIT: usize = 500;

/// Accepted trail lengths
pub const TRAIL_LIMIT_RANGE: RangeInclusive<usize> = 20..=5000;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64,            // step size
    pub g: f64,             // gravitational constant
    pub trail_limit: usize, // trail history cap
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            g: G,
            trail_limit: DEFAULT_TRAIL_LIMIT,
        }
    }
}
