//! Fixed-step time integrators for the N-body system
//!
//! An [`Integrator`] advances exactly one body by exactly one step. It reads
//! the whole ensemble for force evaluation but only writes the stepped body,
//! and only after all of that body's derivative evaluations are done.
//!
//! Two interchangeable schemes are provided:
//! - explicit Euler, one force evaluation per step
//! - classical Runge–Kutta 4, four force evaluations per step

use std::fmt;

use log::warn;

use super::forces::AccelSet;
use super::states::{Body, NVec2};

/// Closed set of stepping strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    Euler,
    #[default]
    Rk4,
}

impl Method {
    /// Resolve a method name. Recognised names are `"RK4"` and `"Euler"`;
    /// anything else falls back to Euler.
    pub fn from_name(name: &str) -> Self {
        match name {
            "RK4" => Method::Rk4,
            "Euler" => Method::Euler,
            other => {
                warn!("unknown integration method {other:?}, falling back to Euler");
                Method::Euler
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Euler => "Euler",
            Method::Rk4 => "RK4",
        }
    }

    /// Force evaluations per body per step
    pub fn stages(&self) -> usize {
        match self {
            Method::Euler => 1,
            Method::Rk4 => 4,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Integrator {
    method: Method,
}

impl Integrator {
    pub fn new(method: Method) -> Self {
        Self { method }
    }

    /// Select the active method by name, see [`Method::from_name`]
    pub fn select(&mut self, name: &str) -> Method {
        self.method = Method::from_name(name);
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Advance `bodies[i]` by `dt` in place.
    ///
    /// Every other body is read in whatever state it currently holds, so when
    /// called in ensemble order the bodies before `i` have already moved this
    /// tick and the bodies after it have not.
    pub fn step(&self, bodies: &mut [Body], i: usize, dt: f64, forces: &AccelSet) {
        let (x, v, a) = match self.method {
            Method::Euler => euler_step(bodies, i, dt, forces),
            Method::Rk4 => rk4_step(bodies, i, dt, forces),
        };

        let b = &mut bodies[i];
        b.x = x;
        b.v = v;
        b.a = a;
    }
}

/// Explicit Euler. Returns `(x_new, v_new, a_n)`
fn euler_step(bodies: &[Body], i: usize, dt: f64, forces: &AccelSet) -> (NVec2, NVec2, NVec2) {
    let b = &bodies[i];

    // one derivative evaluation at the current state
    let (vel, acc) = forces.derivative(bodies, i, &b.x, &b.v);

    // x_n+1 = x_n + dt v_n, v_n+1 = v_n + dt a_n
    (b.x + vel * dt, b.v + acc * dt, acc)
}

/// Classical RK4. Returns `(x_new, v_new, a_n)`
/// Only body `i` is perturbed for the intermediate stages, all other bodies
/// stay where they are.
fn rk4_step(bodies: &[Body], i: usize, dt: f64, forces: &AccelSet) -> (NVec2, NVec2, NVec2) {
    let x0 = bodies[i].x;
    let v0 = bodies[i].v;
    let half_dt = 0.5 * dt;

    // k1: start of the interval
    let (k1v, k1a) = forces.derivative(bodies, i, &x0, &v0);

    // k2: midpoint using k1
    let (k2v, k2a) = forces.derivative(bodies, i, &(x0 + half_dt * k1v), &(v0 + half_dt * k1a));

    // k3: midpoint using k2
    let (k3v, k3a) = forces.derivative(bodies, i, &(x0 + half_dt * k2v), &(v0 + half_dt * k2a));

    // k4: full step using k3
    let (k4v, k4a) = forces.derivative(bodies, i, &(x0 + dt * k3v), &(v0 + dt * k3a));

    // weighted average of the four slopes
    let x = x0 + (dt / 6.0) * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    let v = v0 + (dt / 6.0) * (k1a + 2.0 * k2a + 2.0 * k3a + k4a);

    (x, v, k1a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::NewtonianGravity;
    use crate::simulation::params::G;

    fn free_body() -> Vec<Body> {
        vec![Body::new("drifter", 1.0, NVec2::new(1.0, 2.0), NVec2::new(3.0, -4.0))]
    }

    #[test]
    fn method_names_resolve_exactly() {
        assert_eq!(Method::from_name("RK4"), Method::Rk4);
        assert_eq!(Method::from_name("Euler"), Method::Euler);
        assert_eq!(Method::from_name("rk4"), Method::Euler);
        assert_eq!(Method::from_name("verlet"), Method::Euler);
        assert_eq!(Method::from_name(""), Method::Euler);
    }

    #[test]
    fn select_returns_active_method() {
        let mut integrator = Integrator::default();
        assert_eq!(integrator.method(), Method::Rk4);
        assert_eq!(integrator.select("Euler"), Method::Euler);
        assert_eq!(integrator.select("bogus"), Method::Euler);
        assert_eq!(integrator.select("RK4"), Method::Rk4);
        assert_eq!(integrator.method().to_string(), "RK4");
    }

    #[test]
    fn force_free_body_moves_in_a_straight_line() {
        let forces = AccelSet::new().with(NewtonianGravity::new(G));
        for method in [Method::Euler, Method::Rk4] {
            let mut bodies = free_body();
            Integrator::new(method).step(&mut bodies, 0, 0.5, &forces);
            assert_eq!(bodies[0].x, NVec2::new(2.5, 0.0));
            assert_eq!(bodies[0].v, NVec2::new(3.0, -4.0));
            assert_eq!(bodies[0].a, NVec2::zeros());
        }
    }

    #[test]
    fn euler_uses_start_of_step_acceleration() {
        let forces = AccelSet::new().with(NewtonianGravity::new(1.0));
        let mut bodies = vec![
            Body::new("satellite", 0.0, NVec2::new(0.0, 0.0), NVec2::new(0.0, 1.0)),
            Body::new("mass", 4.0, NVec2::new(2.0, 0.0), NVec2::zeros()),
        ];

        Integrator::new(Method::Euler).step(&mut bodies, 0, 0.1, &forces);

        // a = G m / r^2 = 4 / 4 = 1 towards +x
        assert_eq!(bodies[0].a, NVec2::new(1.0, 0.0));
        assert!((bodies[0].x - NVec2::new(0.0, 0.1)).norm() < 1e-15);
        assert!((bodies[0].v - NVec2::new(0.1, 1.0)).norm() < 1e-15);
        // the other body is untouched
        assert_eq!(bodies[1].x, NVec2::new(2.0, 0.0));
    }

    #[test]
    fn rk4_is_exact_for_constant_acceleration() {
        // a far-away heavy body gives a nearly uniform field; compare against
        // the closed form x0 + v0 t + a t^2 / 2 using the start-of-step pull
        let forces = AccelSet::new().with(NewtonianGravity::new(1.0));
        let mut bodies = vec![
            Body::new("satellite", 0.0, NVec2::zeros(), NVec2::new(1.0, 0.0)),
            Body::new("far", 1.0e12, NVec2::new(0.0, 1.0e6), NVec2::zeros()),
        ];

        Integrator::new(Method::Rk4).step(&mut bodies, 0, 1.0, &forces);

        let a = bodies[0].a;
        let expected = NVec2::new(1.0, 0.0) + 0.5 * a;
        assert!((a.y - 1.0).abs() < 1e-12);
        assert!((bodies[0].x - expected).norm() < 1e-6);
    }
}
