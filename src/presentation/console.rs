//! Text command console driving a simulation session.
//!
//! Commands are single lines, with or without a leading `/`:
//!
//! | command                    | effect                                      |
//! |----------------------------|---------------------------------------------|
//! | `restart`                  | rebuild the active template from scratch    |
//! | `template <name\|1\|2\|3>` | switch to another template                  |
//! | `method <name>`            | select the integrator (`RK4` or `Euler`)    |
//! | `toggle_trails`            | pause/resume trail recording                |
//! | `change_trails_limit <n>`  | keep `n` positions per body, `20..=5000`    |
//! | `clear_trails`             | forget all recorded positions               |
//! | `help`                     | list commands                               |
//!
//! Successful commands return a feedback line; failures come back as
//! [`CommandError`] and leave the session unchanged.

use log::info;
use thiserror::Error;

use crate::configuration::config::{Rgb, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::presentation::palette::Palette;
use crate::presentation::trails::Trails;
use crate::simulation::engine::Simulation;
use crate::simulation::params::TRAIL_LIMIT_RANGE;
use crate::simulation::scenario::{load_template, Scenario};

/// Numeric shortcuts for the bundled templates
const TEMPLATE_ALIASES: [(&str, &str); 3] = [
    ("1", "solar_system"),
    ("2", "binary_system_equal_mass"),
    ("3", "binary_system_unequal_mass"),
];

const HELP: &str = "commands: /restart, /template <name|1|2|3>, /method <RK4|Euler>, \
/toggle_trails, /change_trails_limit <20..5000>, /clear_trails, /help";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument. Usage: {usage}")]
    MissingArgument { usage: &'static str },

    #[error("invalid trail limit {0:?}, must be a number between 20 and 5000")]
    InvalidLimit(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Restart,
    Template(String),
    Method(String),
    ToggleTrails,
    ChangeTrailsLimit(usize),
    ClearTrails,
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(CommandError::Empty)?;
        let arg = parts.next();

        match name {
            "restart" => Ok(Command::Restart),
            "template" => arg
                .map(|a| Command::Template(a.to_string()))
                .ok_or(CommandError::MissingArgument { usage: "/template [name]" }),
            "method" => arg
                .map(|a| Command::Method(a.to_string()))
                .ok_or(CommandError::MissingArgument { usage: "/method [method_name]" }),
            "toggle_trails" => Ok(Command::ToggleTrails),
            "change_trails_limit" => {
                let raw = arg.ok_or(CommandError::MissingArgument {
                    usage: "/change_trails_limit [limit]",
                })?;
                match raw.parse::<usize>() {
                    Ok(limit) if TRAIL_LIMIT_RANGE.contains(&limit) => {
                        Ok(Command::ChangeTrailsLimit(limit))
                    }
                    _ => Err(CommandError::InvalidLimit(raw.to_string())),
                }
            }
            "clear_trails" => Ok(Command::ClearTrails),
            "help" => Ok(Command::Help),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Resolve numeric template shortcuts, pass other names through
pub fn resolve_template(name: &str) -> &str {
    TEMPLATE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, full)| *full)
        .unwrap_or(name)
}

/// One interactive run: the simulation plus everything the presentation
/// layer keeps beside it
pub struct Session {
    config: ScenarioConfig,
    template: String,
    simulation: Simulation,
    trails: Trails,
    palette: Palette,
    colors: Vec<Rgb>,
}

impl Session {
    pub fn new(config: ScenarioConfig, template: &str) -> Result<Self, ConfigError> {
        Self::with_palette(config, template, Palette::new())
    }

    pub fn with_palette(
        config: ScenarioConfig,
        template: &str,
        mut palette: Palette,
    ) -> Result<Self, ConfigError> {
        let template = resolve_template(template).to_string();
        let Scenario { simulation, colors, .. } = Scenario::build_scenario(&config, &template)?;
        let mut trails = Trails::new(simulation.parameters().trail_limit);
        trails.reset(simulation.bodies().len());
        let colors = palette.assign_all(&colors);

        Ok(Self {
            config,
            template,
            simulation,
            trails,
            palette,
            colors,
        })
    }

    /// One tick followed by trail bookkeeping
    pub fn frame(&mut self) {
        self.simulation.tick();
        self.trails.record(self.simulation.bodies());
    }

    /// Parse and apply a command line
    pub fn execute(&mut self, line: &str) -> Result<String, CommandError> {
        let command = Command::parse(line)?;
        self.apply(command)
    }

    pub fn apply(&mut self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::Restart => {
                let template = self.template.clone();
                self.load(&template)?;
                Ok("Simulation restarted!".to_string())
            }
            Command::Template(name) => {
                let name = resolve_template(&name).to_string();
                self.load(&name)?;
                Ok(format!("Template changed to '{name}'."))
            }
            Command::Method(name) => {
                let method = self.simulation.set_method(&name);
                Ok(format!("Method changed to '{method}'."))
            }
            Command::ToggleTrails => {
                let on = self.trails.toggle();
                Ok(format!("Trails is {}!", if on { "activated" } else { "deactivated" }))
            }
            Command::ChangeTrailsLimit(limit) => {
                self.trails.set_limit(limit);
                Ok(format!("Saved trails limit set to {limit}."))
            }
            Command::ClearTrails => {
                self.trails.clear();
                Ok("Trails cleared.".to_string())
            }
            Command::Help => Ok(HELP.to_string()),
        }
    }

    /// Rebuild the ensemble from a template, keeping the current method.
    /// On error nothing changes.
    fn load(&mut self, template: &str) -> Result<(), ConfigError> {
        let (bodies, requested) = load_template(&self.config, template)?;

        self.palette.reset();
        self.colors = self.palette.assign_all(&requested);
        self.trails.reset(bodies.len());
        self.simulation.replace_ensemble(bodies);
        self.template = template.to_string();

        info!("loaded template {template} with method {}", self.simulation.method());
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn trails(&self) -> &Trails {
        &self.trails
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Colour of body `i`
    pub fn color(&self, i: usize) -> Option<Rgb> {
        self.colors.get(i).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::integrator::Method;

    const TEMPLATES: &str = r#"
engine:
  integrator: RK4
parameters:
  dt: 3600.0
  trail_limit: 30
templates:
  solar_system:
    - { name: Sun, mass: 1.989e30, position: [0.0, 0.0], velocity: [0.0, 0.0], color: [255, 255, 255] }
    - { name: Earth, mass: 5.972e24, position: [1.496e11, 0.0], velocity: [0.0, 29780.0] }
  binary_system_equal_mass:
    - { name: A, mass: 1.0e30, position: [-1.0e11, 0.0], velocity: [0.0, -10000.0] }
    - { name: B, mass: 1.0e30, position: [1.0e11, 0.0], velocity: [0.0, 10000.0] }
    - { name: C, mass: 0.0, position: [0.0, 5.0e11], velocity: [0.0, 0.0] }
  broken:
    - { name: Bad, mass: 1.0, position: [0.0], velocity: [0.0, 0.0] }
"#;

    fn session() -> Session {
        let cfg = ScenarioConfig::from_yaml_str(TEMPLATES).unwrap();
        Session::with_palette(cfg, "solar_system", Palette::with_seed(1)).unwrap()
    }

    #[test]
    fn parse_accepts_slash_and_arguments() {
        assert_eq!(Command::parse("/restart").unwrap(), Command::Restart);
        assert_eq!(Command::parse("  method Euler ").unwrap(), Command::Method("Euler".into()));
        let limit = Command::parse("/change_trails_limit 20").unwrap();
        assert_eq!(limit, Command::ChangeTrailsLimit(20));
        assert_eq!(Command::parse("/template 2").unwrap(), Command::Template("2".into()));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(Command::parse("   "), Err(CommandError::Empty)));
        assert!(matches!(Command::parse("/warp 9"), Err(CommandError::UnknownCommand(_))));
        assert!(matches!(Command::parse("/method"), Err(CommandError::MissingArgument { .. })));
        for raw in ["19", "5001", "many"] {
            let parsed = Command::parse(&format!("/change_trails_limit {raw}"));
            assert!(matches!(parsed, Err(CommandError::InvalidLimit(_))), "limit = {raw}");
        }
    }

    #[test]
    fn frames_record_trails_up_to_the_limit() {
        let mut s = session();
        for _ in 0..40 {
            s.frame();
        }
        assert_eq!(s.trails().trail(1).unwrap().len(), 30);
        assert_eq!(s.trails().trail(1).unwrap().back(), Some(&s.simulation().bodies()[1].x));
    }

    #[test]
    fn template_switch_keeps_method_and_resets_trails() {
        let mut s = session();
        s.execute("/method Euler").unwrap();
        s.frame();

        let msg = s.execute("/template 2").unwrap();
        assert_eq!(msg, "Template changed to 'binary_system_equal_mass'.");
        assert_eq!(s.template(), "binary_system_equal_mass");
        assert_eq!(s.simulation().bodies().len(), 3);
        assert_eq!(s.simulation().method(), Method::Euler);
        assert!(s.trails().trail(2).unwrap().is_empty());
        assert!(s.color(2).is_some());
    }

    #[test]
    fn restart_restores_initial_state() {
        let mut s = session();
        let initial = s.simulation().bodies().to_vec();
        s.frame();
        assert_ne!(s.simulation().bodies()[1].x, initial[1].x);
        s.execute("restart").unwrap();
        assert_eq!(s.simulation().bodies(), initial.as_slice());
        assert_eq!(s.color(0), Some([255, 255, 255]));
    }

    #[test]
    fn failed_template_load_leaves_session_untouched() {
        let mut s = session();
        let err = s.execute("/template broken").unwrap_err();
        assert!(matches!(err, CommandError::Config(ConfigError::Dimension { .. })));
        let err = s.execute("/template missing").unwrap_err();
        assert!(matches!(err, CommandError::Config(ConfigError::UnknownTemplate(_))));
        assert_eq!(s.template(), "solar_system");
        assert_eq!(s.simulation().bodies().len(), 2);
    }

    #[test]
    fn unknown_method_falls_back_to_euler() {
        let mut s = session();
        assert_eq!(s.execute("/method leapfrog").unwrap(), "Method changed to 'Euler'.");
        assert_eq!(s.simulation().method(), Method::Euler);
    }

    #[test]
    fn trail_commands() {
        let mut s = session();
        s.frame();
        assert_eq!(s.execute("/toggle_trails").unwrap(), "Trails is deactivated!");
        s.frame();
        assert_eq!(s.trails().trail(0).unwrap().len(), 1);
        s.execute("/toggle_trails").unwrap();
        s.execute("/change_trails_limit 25").unwrap();
        assert_eq!(s.trails().limit(), 25);
        s.execute("/clear_trails").unwrap();
        assert!(s.trails().trail(0).unwrap().is_empty());
        assert!(s.execute("/help").unwrap().contains("/method"));
    }
}
