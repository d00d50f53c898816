//! Simulation driver
//!
//! Owns the ensemble, the fixed step size and the integrator. One `tick`
//! advances every body once, in ensemble order, and runs to completion before
//! returning. `tick` and `replace_ensemble` both take `&mut self`, so the
//! borrow checker already rules out swapping the ensemble mid-tick.

use log::{debug, info};

use super::forces::{AccelSet, NewtonianGravity};
use super::integrator::{Integrator, Method};
use super::params::Parameters;
use super::states::Body;

pub struct Simulation {
    bodies: Vec<Body>,
    parameters: Parameters,
    integrator: Integrator,
    forces: AccelSet,
    ticks: u64,
}

impl Simulation {
    /// Build a simulation with Newtonian gravity as its only force term
    pub fn new(bodies: Vec<Body>, parameters: Parameters, method: Method) -> Self {
        let forces = AccelSet::new().with(NewtonianGravity::new(parameters.g));
        Self::with_forces(bodies, parameters, method, forces)
    }

    pub fn with_forces(
        bodies: Vec<Body>,
        parameters: Parameters,
        method: Method,
        forces: AccelSet,
    ) -> Self {
        Self {
            bodies,
            parameters,
            integrator: Integrator::new(method),
            forces,
            ticks: 0,
        }
    }

    /// Advance the whole ensemble by one step of `dt`
    pub fn tick(&mut self) {
        let dt = self.parameters.dt;
        for i in 0..self.bodies.len() {
            self.integrator.step(&mut self.bodies, i, dt, &self.forces);
        }
        self.ticks += 1;
        debug!(
            "tick {} done ({} bodies, {})",
            self.ticks,
            self.bodies.len(),
            self.integrator.method()
        );
    }

    /// Run `n` ticks back to back
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Swap the whole ensemble at once, e.g. on template reload
    pub fn replace_ensemble(&mut self, bodies: Vec<Body>) {
        info!("replacing ensemble: {} -> {} bodies", self.bodies.len(), bodies.len());
        self.bodies = bodies;
        self.ticks = 0;
    }

    /// Select the integration method by name; unknown names fall back to Euler
    pub fn set_method(&mut self, name: &str) -> Method {
        let method = self.integrator.select(name);
        info!("integration method set to {method}");
        method
    }

    pub fn method(&self) -> Method {
        self.integrator.method()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn dt(&self) -> f64 {
        self.parameters.dt
    }

    /// Ticks since construction or the last ensemble replacement
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time since construction or the last ensemble replacement
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.parameters.dt
    }
}
