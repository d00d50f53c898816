//! Force / acceleration contributors for the n-body engine
//!
//! The state derivative of one body is `(velocity, acceleration)`. Integrators
//! evaluate it at perturbed intermediate states, so every term receives an
//! explicit position instead of reading the body's stored one.

use crate::simulation::states::{Body, NVec2};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector for the evaluated body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Number of registered terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// State derivative of body `i` evaluated at `(x, v)` against `bodies`
    /// - first component is `v` itself (dx/dt)
    /// - second is the summed acceleration of every term (dv/dt)
    pub fn derivative(&self, bodies: &[Body], i: usize, x: &NVec2, v: &NVec2) -> (NVec2, NVec2) {
        let mut a = NVec2::zeros();
        for term in &self.terms {
            a += term.acceleration(bodies, i, x);
        }
        (*v, a)
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources
/// `i` is the index of the evaluated body inside `bodies`, `x` the position
/// it is evaluated at (not necessarily `bodies[i].x`)
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], i: usize, x: &NVec2) -> NVec2;
}

/// Direct-summation Newtonian gravity, no softening
///
/// The acceleration on the evaluated body is `sum G * m_o * d / |d|^3` over
/// every other body `o`, with `d = o.x - x`. The evaluated body's own mass
/// cancels out, so zero-mass test bodies are handled without dividing by it.
/// Pairs at zero separation contribute nothing.
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], i: usize, x: &NVec2) -> NVec2 {
        let mut a = NVec2::zeros();

        for (j, other) in bodies.iter().enumerate() {
            // identity, not name: a body never attracts itself
            if j == i {
                continue;
            }

            // vector from the evaluated point towards the other body
            let d = other.x - x;
            let r = d.norm();

            // coincident positions: silently skip the singular pair
            if r == 0.0 {
                continue;
            }

            a += (self.g * other.m / (r * r * r)) * d;
        }

        a
    }
}
