//! Core state types for the N-body simulation.
//!
//! A `Body` carries only physically meaningful fields. Presentation concerns
//! (colour, trail history) live in side tables keyed by the body's index in
//! the ensemble, see [`crate::presentation`].
//!
//! Body identity is its position in the ensemble slice, never its name: two
//! bodies may share a name without any effect on the physics.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // display label
    pub m: f64,       // mass, finite and >= 0
    pub x: NVec2,     // position
    pub v: NVec2,     // velocity
    pub a: NVec2,     // acceleration cached during the last step, read-only for consumers
}

impl Body {
    pub fn new(name: impl Into<String>, m: f64, x: NVec2, v: NVec2) -> Self {
        Self {
            name: name.into(),
            m,
            x,
            v,
            a: NVec2::zeros(),
        }
    }

    /// Momentum `m * v`
    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }
}
