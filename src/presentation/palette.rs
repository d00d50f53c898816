//! Per-run colour assignment.
//!
//! Bodies without an explicit colour get a random one that no other body of
//! the same run uses. The used-colour set lives in the `Palette`, so a new run
//! (or template reload) starts from a clean slate.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::Rgb;

/// Number of distinct RGB triples
const COLOR_SPACE: usize = 1 << 24;

pub struct Palette {
    used: HashSet<Rgb>,
    rng: StdRng,
    capacity: usize, // distinct colours available before uniqueness is dropped
}

impl Palette {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic palette for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            used: HashSet::new(),
            rng,
            capacity: COLOR_SPACE,
        }
    }

    /// Explicit colours are honoured as given (and marked used); missing ones
    /// are drawn until an unused triple comes up. Once every colour is taken
    /// the draw repeats an existing one.
    pub fn assign(&mut self, requested: Option<Rgb>) -> Rgb {
        if let Some(color) = requested {
            self.used.insert(color);
            return color;
        }
        if self.used.len() >= self.capacity {
            return [self.rng.gen(), self.rng.gen(), self.rng.gen()];
        }
        loop {
            let color: Rgb = [self.rng.gen(), self.rng.gen(), self.rng.gen()];
            if self.used.insert(color) {
                return color;
            }
        }
    }

    /// Colours for a whole ensemble, index-aligned with `requested`
    pub fn assign_all(&mut self, requested: &[Option<Rgb>]) -> Vec<Rgb> {
        requested.iter().map(|c| self.assign(*c)).collect()
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }

    pub fn used(&self) -> usize {
        self.used.len()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
