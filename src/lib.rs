pub mod simulation;
pub mod configuration;
pub mod presentation;
pub mod benchmark;

pub use simulation::states::{Body, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{Integrator, Method};
pub use simulation::engine::Simulation;
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig, Rgb};
pub use configuration::error::ConfigError;

pub use presentation::{console::{Command, CommandError, Session}, palette::Palette, trails::Trails};

pub use benchmark::benchmark::bench_integrators;
