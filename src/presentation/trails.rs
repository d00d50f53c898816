//! Bounded position history per body.
//!
//! Kept beside the ensemble, index-aligned with it, so the physics types never
//! carry rendering state. The physics core never reads trails.

use std::collections::VecDeque;

use crate::simulation::states::{Body, NVec2};

#[derive(Debug, Clone)]
pub struct Trails {
    limit: usize,
    enabled: bool,
    trails: Vec<VecDeque<NVec2>>,
}

impl Trails {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            enabled: true,
            trails: Vec::new(),
        }
    }

    /// Append every body's current position, evicting the oldest entries
    /// beyond the limit. No-op while disabled.
    pub fn record(&mut self, bodies: &[Body]) {
        if !self.enabled {
            return;
        }
        if self.trails.len() != bodies.len() {
            self.trails.resize_with(bodies.len(), VecDeque::new);
        }
        for (trail, b) in self.trails.iter_mut().zip(bodies) {
            trail.push_back(b.x);
            while trail.len() > self.limit {
                trail.pop_front();
            }
        }
    }

    /// Change the cap; existing trails are cut down immediately
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        for trail in &mut self.trails {
            while trail.len() > limit {
                trail.pop_front();
            }
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Empty every trail but keep one slot per body
    pub fn clear(&mut self) {
        for trail in &mut self.trails {
            trail.clear();
        }
    }

    /// Drop all history and size for a new ensemble of `n` bodies
    pub fn reset(&mut self, n: usize) {
        self.trails = vec![VecDeque::new(); n];
    }

    /// Flip recording on/off, returns the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Oldest-first history of body `i`
    pub fn trail(&self, i: usize) -> Option<&VecDeque<NVec2>> {
        self.trails.get(i)
    }
}
