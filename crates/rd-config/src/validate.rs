//! Run configuration validation.

use crate::schema::{LATEST_VERSION, MAX_SAMPLES, RunConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive and finite"))
    }
}

fn non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be non-negative and finite"))
    }
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let rotor = &config.rotor;
    positive("rotor.mass", rotor.mass)?;
    positive("rotor.journal_mass", rotor.journal_mass)?;
    positive("rotor.shaft_stiffness", rotor.shaft_stiffness)?;
    non_negative("rotor.modal_damping", rotor.modal_damping)?;
    if !rotor.unbalance_eccentricity.is_finite() {
        return Err(invalid(
            "rotor.unbalance_eccentricity",
            rotor.unbalance_eccentricity,
            "must be finite",
        ));
    }

    let bearing = &config.bearing;
    positive("bearing.width", bearing.width)?;
    positive("bearing.diameter", bearing.diameter)?;
    positive("bearing.clearance", bearing.clearance)?;
    positive("bearing.viscosity", bearing.viscosity)?;
    if bearing.b2d() >= 1.0 {
        return Err(ValidationError::Unsupported {
            feature: format!("width/diameter ratio {}", bearing.b2d()),
            reason: "short-bearing theory needs B/D < 1".to_string(),
        });
    }
    if bearing.count == 0 {
        return Err(invalid("bearing.count", bearing.count, "must be at least 1"));
    }

    let run_up = &config.run_up;
    positive("run_up.t_max", run_up.t_max)?;
    positive("run_up.f_max", run_up.f_max)?;
    positive("run_up.samples_per_period", run_up.samples_per_period)?;
    non_negative("run_up.gravity", run_up.gravity)?;
    if run_up.sample_count() < 2 {
        return Err(invalid(
            "run_up.samples_per_period",
            run_up.samples_per_period,
            "run must produce at least two samples",
        ));
    }
    if run_up.sample_count() > MAX_SAMPLES {
        return Err(invalid(
            "run_up.samples_per_period",
            run_up.samples_per_period,
            &format!("run would produce more than {MAX_SAMPLES} samples"),
        ));
    }

    let solver = &config.solver;
    positive("solver.rtol", solver.rtol)?;
    positive("solver.atol", solver.atol)?;
    positive("solver.initial_step", solver.initial_step)?;
    non_negative("solver.min_step", solver.min_step)?;
    if solver.max_steps == 0 {
        return Err(invalid("solver.max_steps", solver.max_steps, "must be positive"));
    }
    if let Some(h) = solver.max_step {
        positive("solver.max_step", h)?;
    }
    if let Some(limit) = solver.wall_clock_limit_s {
        positive("solver.wall_clock_limit_s", limit)?;
    }
    if !solver.initial_offset.is_finite() {
        return Err(invalid(
            "solver.initial_offset",
            solver.initial_offset,
            "must be finite",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate_config(&RunConfig::default()).unwrap();
    }

    #[test]
    fn rejects_non_physical_values() {
        let mut cfg = RunConfig::default();
        cfg.bearing.clearance = 0.0;
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("bearing.clearance"));

        let mut cfg = RunConfig::default();
        cfg.rotor.mass = f64::NAN;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = RunConfig::default();
        cfg.solver.rtol = -1e-6;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn rejects_long_bearings() {
        let mut cfg = RunConfig::default();
        cfg.bearing.width = 7e-3;
        assert!(matches!(
            validate_config(&cfg),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn rejects_empty_sampling() {
        let mut cfg = RunConfig::default();
        cfg.run_up.samples_per_period = 1e-6;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn caps_sample_count() {
        let mut cfg = RunConfig::default();
        cfg.run_up.t_max = 1e3;
        cfg.run_up.f_max = 1e6;
        cfg.run_up.samples_per_period = 1e6;
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { ref field, .. } if field == "run_up.samples_per_period"
        ));

        cfg.run_up.samples_per_period = MAX_SAMPLES as f64 / 1e9;
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn rejects_future_versions() {
        let cfg = RunConfig {
            version: LATEST_VERSION + 1,
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&cfg),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
