use std::time::Instant;

use crate::simulation::engine::Simulation;
use crate::simulation::integrator::Method;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Helper to build a deterministic ensemble of size `n`
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec2::new((i_f * 0.37).sin() * 5.0e11, (i_f * 0.13).cos() * 5.0e11);
            Body::new(format!("b{i}"), 1.0e24, x, NVec2::zeros())
        })
        .collect()
}

/// Average wall-clock milliseconds per tick over `steps` ticks
fn ms_per_tick(n: usize, method: Method, steps: u32) -> f64 {
    let mut sim = Simulation::new(make_bodies(n), Parameters::default(), method);

    // Warm up
    sim.tick();

    let t0 = Instant::now();
    for _ in 0..steps {
        sim.tick();
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Compare Euler and RK4 tick cost for growing n
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrators() {
    println!("N,euler_ms,rk4_ms");

    for n in (100..=1600).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 10 } else { 2 };

        let ms_euler = ms_per_tick(n, Method::Euler, steps);
        let ms_rk4 = ms_per_tick(n, Method::Rk4, steps);

        println!("{},{:.6},{:.6}", n, ms_euler, ms_rk4);
    }
}
