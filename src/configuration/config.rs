//! Configuration types for loading simulation templates from YAML.
//!
//! A template file holds a set of named ensembles plus optional engine and
//! numerical settings shared by all of them:
//!
//! - [`EngineConfig`]     – integration method name
//! - [`ParametersConfig`] – step size, gravitational constant, trail length
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a template file
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "RK4"       # or "Euler"; anything else falls back to Euler
//!
//! parameters:
//!   dt: 200000.0            # fixed step size (s)
//!   G: 6.67430e-11          # gravitational constant
//!   trail_limit: 500        # positions kept per body by the presentation layer
//!
//! templates:
//!   solar_system:
//!     - name: Sun
//!       mass: 1.989e30
//!       position: [0.0, 0.0]
//!       velocity: [0.0, 0.0]
//!       color: [255, 255, 255]
//!     - name: Earth
//!       mass: 5.972e24
//!       position: [1.496e11, 0.0]
//!       velocity: [0.0, 29780.0]
//! ```
//!
//! Vectors are read as plain sequences so that a wrong dimensionality is
//! reported by [`crate::simulation::scenario`] with the offending body's name
//! instead of being lost in a generic parse error.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::configuration::error::ConfigError;
use crate::simulation::params::{DEFAULT_DT, DEFAULT_TRAIL_LIMIT, G};

/// RGB triple used by the presentation layer
pub type Rgb = [u8; 3];

/// Engine configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_integrator")]
    pub integrator: String, // method name, resolved permissively
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { integrator: default_integrator() }
    }
}

/// Global numerical and physical parameters for a template file
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    #[serde(default = "default_dt")]
    pub dt: f64, // time step size
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default = "default_trail_limit")]
    pub trail_limit: usize, // trail history cap
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            g: default_g(),
            trail_limit: default_trail_limit(),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,       // display label
    pub mass: f64,          // mass, must be finite and >= 0
    pub position: Vec<f64>, // must hold exactly 2 components
    pub velocity: Vec<f64>, // must hold exactly 2 components
    #[serde(default)]
    pub color: Option<Rgb>, // presentation only
}

/// Top-level template file
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub templates: BTreeMap<String, Vec<BodyConfig>>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Body records of a named template
    pub fn template(&self, name: &str) -> Result<&[BodyConfig], ConfigError> {
        self.templates
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ConfigError::UnknownTemplate(name.to_string()))
    }

    /// Template names in sorted order
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

fn default_integrator() -> String {
    "RK4".to_string()
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_g() -> f64 {
    G
}

fn default_trail_limit() -> usize {
    DEFAULT_TRAIL_LIMIT
}
