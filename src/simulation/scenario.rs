//! Build fully-initialized simulations from configuration
//!
//! Takes body records (YAML-facing) and produces runtime values:
//! - each [`BodyConfig`] is validated and mapped to a [`Body`]
//! - a [`Scenario`] bundles the running [`Simulation`] with the presentation
//!   colours requested by the template, index-aligned with the ensemble
//!
//! Malformed records are rejected here, before any NaN can reach the
//! integration loop.

use log::info;

use crate::configuration::config::{BodyConfig, ParametersConfig, Rgb, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::engine::Simulation;
use crate::simulation::integrator::Method;
use crate::simulation::params::{Parameters, TRAIL_LIMIT_RANGE};
use crate::simulation::states::{Body, NVec2};

/// Map a single record to a runtime body
pub fn build_body(bc: &BodyConfig) -> Result<Body, ConfigError> {
    if !bc.mass.is_finite() || bc.mass < 0.0 {
        return Err(ConfigError::InvalidMass {
            body: bc.name.clone(),
            mass: bc.mass,
        });
    }
    let x = vec2(&bc.name, "position", &bc.position)?;
    let v = vec2(&bc.name, "velocity", &bc.velocity)?;
    Ok(Body::new(bc.name.clone(), bc.mass, x, v))
}

/// Map records to bodies, preserving order. Stops at the first bad record.
pub fn build_bodies(records: &[BodyConfig]) -> Result<Vec<Body>, ConfigError> {
    records.iter().map(build_body).collect()
}

/// Runtime parameters from their config form
pub fn build_parameters(p_cfg: &ParametersConfig) -> Result<Parameters, ConfigError> {
    if !p_cfg.dt.is_finite() || p_cfg.dt <= 0.0 {
        return Err(ConfigError::InvalidTimeStep(p_cfg.dt));
    }
    if !p_cfg.g.is_finite() || p_cfg.g < 0.0 {
        return Err(ConfigError::InvalidGravity(p_cfg.g));
    }
    if !TRAIL_LIMIT_RANGE.contains(&p_cfg.trail_limit) {
        return Err(ConfigError::InvalidTrailLimit(p_cfg.trail_limit));
    }
    Ok(Parameters {
        dt: p_cfg.dt,
        g: p_cfg.g,
        trail_limit: p_cfg.trail_limit,
    })
}

fn vec2(body: &str, field: &'static str, xs: &[f64]) -> Result<NVec2, ConfigError> {
    if xs.len() != 2 {
        return Err(ConfigError::Dimension {
            body: body.to_string(),
            field,
            len: xs.len(),
        });
    }
    if xs.iter().any(|c| !c.is_finite()) {
        return Err(ConfigError::NonFinite {
            body: body.to_string(),
            field,
        });
    }
    Ok(NVec2::new(xs[0], xs[1]))
}

/// A running simulation built from one named template
pub struct Scenario {
    pub template: String,
    pub simulation: Simulation,
    pub colors: Vec<Option<Rgb>>, // requested colour per body index
}

impl Scenario {
    /// Build the named template using the file-level engine settings
    pub fn build_scenario(cfg: &ScenarioConfig, template: &str) -> Result<Self, ConfigError> {
        let method = Method::from_name(&cfg.engine.integrator);
        Self::build_with_method(cfg, template, method)
    }

    /// Build the named template with an explicit method
    pub fn build_with_method(
        cfg: &ScenarioConfig,
        template: &str,
        method: Method,
    ) -> Result<Self, ConfigError> {
        let (bodies, colors) = load_template(cfg, template)?;
        let parameters = build_parameters(&cfg.parameters)?;

        info!(
            "template {template}: {} bodies, dt = {}, method = {method}",
            bodies.len(),
            parameters.dt
        );

        Ok(Self {
            template: template.to_string(),
            simulation: Simulation::new(bodies, parameters, method),
            colors,
        })
    }
}

/// Validated bodies and requested colours of a non-empty template
pub fn load_template(
    cfg: &ScenarioConfig,
    template: &str,
) -> Result<(Vec<Body>, Vec<Option<Rgb>>), ConfigError> {
    let records = cfg.template(template)?;
    if records.is_empty() {
        return Err(ConfigError::EmptyTemplate(template.to_string()));
    }
    let bodies = build_bodies(records)?;
    let colors = records.iter().map(|bc| bc.color).collect();
    Ok((bodies, colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, mass: f64, position: Vec<f64>, velocity: Vec<f64>) -> BodyConfig {
        BodyConfig {
            name: name.to_string(),
            mass,
            position,
            velocity,
            color: None,
        }
    }

    #[test]
    fn records_map_in_order() {
        let records = vec![
            record("Sun", 1.989e30, vec![0.0, 0.0], vec![0.0, 0.0]),
            record("Earth", 5.972e24, vec![1.496e11, 0.0], vec![0.0, 29780.0]),
        ];
        let bodies = build_bodies(&records).unwrap();
        assert_eq!(bodies[0].name, "Sun");
        assert_eq!(bodies[1].name, "Earth");
        assert_eq!(bodies[1].x, NVec2::new(1.496e11, 0.0));
        assert_eq!(bodies[1].v, NVec2::new(0.0, 29780.0));
        assert_eq!(bodies[1].a, NVec2::zeros());
    }

    #[test]
    fn zero_mass_is_accepted() {
        let body = build_body(&record("dust", 0.0, vec![1.0, 1.0], vec![0.0, 0.0])).unwrap();
        assert_eq!(body.m, 0.0);
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let err = build_body(&record("X", 1.0, vec![1.0, 2.0, 3.0], vec![0.0, 0.0])).unwrap_err();
        assert!(matches!(err, ConfigError::Dimension { field: "position", len: 3, .. }));

        let err = build_body(&record("X", 1.0, vec![1.0, 2.0], vec![0.0])).unwrap_err();
        assert!(matches!(err, ConfigError::Dimension { field: "velocity", len: 1, .. }));
    }

    #[test]
    fn bad_mass_is_rejected() {
        for mass in [-1.0, f64::NAN, f64::INFINITY] {
            let err = build_body(&record("X", mass, vec![0.0, 0.0], vec![0.0, 0.0])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidMass { .. }));
        }
    }

    #[test]
    fn non_finite_components_are_rejected() {
        let err = build_body(&record("X", 1.0, vec![0.0, f64::NAN], vec![0.0, 0.0])).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "position", .. }));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let p = ParametersConfig { dt, ..ParametersConfig::default() };
            let result = build_parameters(&p);
            assert!(matches!(result, Err(ConfigError::InvalidTimeStep(_))), "dt = {dt}");
        }
    }

    #[test]
    fn bad_gravitational_constant_is_rejected() {
        for g in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -6.67430e-11] {
            let p = ParametersConfig { g, ..ParametersConfig::default() };
            let result = build_parameters(&p);
            assert!(matches!(result, Err(ConfigError::InvalidGravity(_))), "G = {g}");
        }

        // a field-free run is legal
        let p = ParametersConfig { g: 0.0, ..ParametersConfig::default() };
        assert_eq!(build_parameters(&p).unwrap().g, 0.0);
    }

    #[test]
    fn nan_gravity_in_yaml_never_reaches_a_tick() {
        let yaml = r#"
parameters:
  G: .nan
templates:
  pair:
    - { name: A, mass: 1.0e24, position: [0.0, 0.0], velocity: [0.0, 0.0] }
    - { name: B, mass: 1.0e24, position: [1.0e8, 0.0], velocity: [0.0, 0.0] }
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        let err = Scenario::build_scenario(&cfg, "pair").err().unwrap();
        assert!(matches!(err, ConfigError::InvalidGravity(g) if g.is_nan()));
    }

    #[test]
    fn trail_limit_outside_range_is_rejected() {
        for trail_limit in [0, 19, 5001] {
            let p = ParametersConfig { trail_limit, ..ParametersConfig::default() };
            assert!(matches!(
                build_parameters(&p),
                Err(ConfigError::InvalidTrailLimit(n)) if n == trail_limit
            ));
        }
        for trail_limit in [20, 5000] {
            let p = ParametersConfig { trail_limit, ..ParametersConfig::default() };
            assert_eq!(build_parameters(&p).unwrap().trail_limit, trail_limit);
        }
    }

    #[test]
    fn empty_template_is_rejected() {
        let cfg = ScenarioConfig::from_yaml_str("templates: { empty: [] }").unwrap();
        let err = load_template(&cfg, "empty").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTemplate(ref name) if name == "empty"));
        let built = Scenario::build_scenario(&cfg, "empty");
        assert!(matches!(built, Err(ConfigError::EmptyTemplate(_))));
    }

    #[test]
    fn invalid_dt_in_yaml_is_rejected_at_build() {
        for dt in ["-1.0", ".nan"] {
            let yaml = format!(
                r#"
parameters: {{ dt: {dt} }}
templates:
  one:
    - {{ name: A, mass: 1.0, position: [0.0, 0.0], velocity: [0.0, 0.0] }}
"#
            );
            let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
            let built = Scenario::build_scenario(&cfg, "one");
            assert!(matches!(built, Err(ConfigError::InvalidTimeStep(_))), "dt = {dt}");
        }
    }
}
