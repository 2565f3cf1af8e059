//! Run configuration schema.
//!
//! Every section falls back to the nominal rotor/bearing set, so a config
//! file only needs the values it changes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub version: u32,
    pub name: String,
    pub rotor: RotorDef,
    pub bearing: BearingDef,
    pub run_up: RunUpDef,
    pub solver: SolverDef,
    pub output: OutputDef,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "jeffcott-short-bearing".to_string(),
            rotor: RotorDef::default(),
            bearing: BearingDef::default(),
            run_up: RunUpDef::default(),
            solver: SolverDef::default(),
            output: OutputDef::default(),
        }
    }
}

/// Jeffcott rotor parameters (SI).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotorDef {
    /// Disc mass (kg)
    pub mass: f64,
    /// Mass lumped at each journal (kg)
    pub journal_mass: f64,
    /// Offset of the disc mass centre (m)
    pub unbalance_eccentricity: f64,
    /// Shaft bending stiffness (N/m)
    pub shaft_stiffness: f64,
    /// Shaft damping as a fraction of `sqrt(k m)`
    pub modal_damping: f64,
}

impl Default for RotorDef {
    fn default() -> Self {
        Self {
            mass: 0.1,
            journal_mass: 1e-5,
            unbalance_eccentricity: 1e-6,
            shaft_stiffness: 1e5,
            modal_damping: 1e-2,
        }
    }
}

impl RotorDef {
    /// Shaft damping coefficient (N·s/m).
    pub fn damping(&self) -> f64 {
        self.modal_damping * (self.shaft_stiffness * self.mass).sqrt()
    }

    /// Unbalance `m e` (kg·m).
    pub fn unbalance(&self) -> f64 {
        self.mass * self.unbalance_eccentricity
    }
}

/// Journal bearing geometry and oil (SI).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BearingDef {
    pub width: f64,
    pub diameter: f64,
    pub clearance: f64,
    pub viscosity: f64,
    /// Identical bearings carrying the rotor
    pub count: usize,
}

impl Default for BearingDef {
    fn default() -> Self {
        Self {
            width: 3.5e-3,
            diameter: 7e-3,
            clearance: 15e-6,
            viscosity: 1e-2,
            count: 2,
        }
    }
}

impl BearingDef {
    pub fn b2d(&self) -> f64 {
        self.width / self.diameter
    }
}

/// Upper bound on output samples per run.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Linear speed ramp from standstill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunUpDef {
    /// Run-up duration (s)
    pub t_max: f64,
    /// Rotor frequency reached at `t_max` (Hz)
    pub f_max: f64,
    /// Output samples per period of `f_max`
    pub samples_per_period: f64,
    /// Gravitational acceleration along -y (m/s²)
    pub gravity: f64,
}

impl Default for RunUpDef {
    fn default() -> Self {
        Self {
            t_max: 1.0,
            f_max: 500.0,
            samples_per_period: 30.0,
            gravity: rd_core::constants::G_MPS2,
        }
    }
}

impl RunUpDef {
    /// Angular acceleration `2 pi f_max / t_max` (rad/s²).
    pub fn angular_acceleration(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.f_max / self.t_max
    }

    /// Number of output samples, `t_max * f_max * samples_per_period` truncated.
    pub fn sample_count(&self) -> usize {
        (self.t_max * self.f_max * self.samples_per_period) as usize
    }

    /// Evenly spaced output times over `[0, t_max]`, both ends included.
    pub fn sample_times(&self) -> Vec<f64> {
        let n = self.sample_count();
        match n {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => (0..n)
                .map(|i| self.t_max * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Adaptive L-stable ESDIRK3(2)4L[2]SA, order 3(2)
    #[default]
    Esdirk32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JacobianDef {
    #[default]
    Forward,
    Central,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub method: SolverMethod,
    pub rtol: f64,
    pub atol: f64,
    pub max_steps: usize,
    pub min_step: f64,
    pub initial_step: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_clock_limit_s: Option<f64>,
    /// Value of every state component at t = 0
    pub initial_offset: f64,
    pub jacobian: JacobianDef,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            rtol: 1e-6,
            atol: 1e-6,
            max_steps: 100_000,
            min_step: 1e-14,
            initial_step: 1e-6,
            max_step: None,
            wall_clock_limit_s: None,
            initial_offset: 1e-10,
            jacobian: JacobianDef::default(),
        }
    }
}

/// Where a run writes its results. Command-line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_derived_values() {
        let cfg = RunConfig::default();
        assert!((cfg.rotor.damping() - 1e-2 * (1e4_f64).sqrt()).abs() < 1e-12);
        assert!((cfg.rotor.unbalance() - 1e-7).abs() < 1e-20);
        assert!((cfg.bearing.b2d() - 0.5).abs() < 1e-15);
        assert!((cfg.run_up.angular_acceleration() - 1000.0 * std::f64::consts::PI).abs() < 1e-9);
        assert_eq!(cfg.run_up.sample_count(), 15_000);
    }

    #[test]
    fn sample_times_cover_the_run() {
        let run_up = RunUpDef {
            t_max: 0.05,
            f_max: 25.0,
            ..Default::default()
        };
        let t = run_up.sample_times();
        assert_eq!(t.len(), 37);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[36], 0.05);
        assert!(t.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let yaml = "run_up:\n  t_max: 0.2\nsolver:\n  rtol: 1.0e-5\n";
        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.run_up.t_max, 0.2);
        assert_eq!(cfg.run_up.f_max, 500.0);
        assert_eq!(cfg.solver.rtol, 1e-5);
        assert_eq!(cfg.solver.atol, 1e-6);
        assert_eq!(cfg.bearing, BearingDef::default());
        assert_eq!(cfg.version, LATEST_VERSION);
    }

    #[test]
    fn unknown_solver_method_is_rejected() {
        let yaml = "solver:\n  method: rk45\n";
        assert!(serde_yaml::from_str::<RunConfig>(yaml).is_err());
    }
}
