use gravsim::simulation::diagnostics::{total_energy, total_momentum};
use gravsim::{bench_integrators, ScenarioConfig, Session};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless Newtonian N-body simulator")]
struct Args {
    /// Template file, looked up under scenarios/ unless the path exists
    #[arg(short, long, default_value = "templates.yaml")]
    file_name: String,

    /// Template to run (name or 1/2/3 shortcut)
    #[arg(short, long, default_value = "solar_system")]
    template: String,

    /// Integration method, overrides the file (RK4 or Euler)
    #[arg(short, long)]
    method: Option<String>,

    /// Step size in seconds, overrides the file
    #[arg(long)]
    dt: Option<f64>,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    ticks: u64,

    /// Console commands applied before the run, e.g. "/change_trails_limit 100"
    #[arg(short, long = "command")]
    commands: Vec<String>,

    /// Run the integrator benchmark instead of a simulation
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_config(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load template file {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_integrators();
        return Ok(());
    }

    let mut config = load_config(&args.file_name)?;
    if let Some(dt) = args.dt {
        config.parameters.dt = dt;
    }
    let g = config.parameters.g;
    let mut session = Session::new(config, &args.template)
        .with_context(|| format!("failed to build template {}", args.template))?;

    if let Some(method) = &args.method {
        session.execute(&format!("/method {method}"))?;
    }
    for command in &args.commands {
        let feedback = session
            .execute(command)
            .with_context(|| format!("command {command:?} failed"))?;
        info!("{feedback}");
    }

    let e0 = total_energy(session.simulation().bodies(), g);
    let p0 = total_momentum(session.simulation().bodies());

    for _ in 0..args.ticks {
        session.frame();
    }

    let sim = session.simulation();
    println!(
        "{} after {} ticks of {} s ({}):",
        session.template(),
        sim.ticks(),
        sim.dt(),
        sim.method()
    );
    println!("{:<12} {:>14} {:>14} {:>12} {:>12}", "name", "x", "y", "vx", "vy");
    for b in sim.bodies() {
        println!(
            "{:<12} {:>14.6e} {:>14.6e} {:>12.4} {:>12.4}",
            b.name, b.x.x, b.x.y, b.v.x, b.v.y
        );
    }

    let e1 = total_energy(sim.bodies(), g);
    let p1 = total_momentum(sim.bodies());
    if e0 != 0.0 {
        println!("relative energy drift: {:.3e}", (e1 - e0) / e0.abs());
    }
    println!("momentum drift: {:.3e}", (p1 - p0).norm());

    Ok(())
}
