//! Error types for loading templates and bootstrapping ensembles.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template {0} has no bodies")]
    EmptyTemplate(String),

    #[error("body {body}: {field} must have 2 components, got {len}")]
    Dimension {
        body: String,
        field: &'static str,
        len: usize,
    },

    #[error("body {body}: mass must be finite and non-negative, got {mass}")]
    InvalidMass { body: String, mass: f64 },

    #[error("body {body}: {field} is not finite")]
    NonFinite { body: String, field: &'static str },

    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),

    #[error("gravitational constant must be finite and non-negative, got {0}")]
    InvalidGravity(f64),

    #[error("trail limit must be between 20 and 5000, got {0}")]
    InvalidTrailLimit(usize),
}
