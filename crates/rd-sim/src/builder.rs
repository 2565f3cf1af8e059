//! Assembles the rotor model and integrator from a run configuration.

use std::time::Duration;

use nalgebra::DVector;
use rd_bearing::{BearingForceAdapter, BearingGeometry};
use rd_config::{JacobianDef, RunConfig, SolverDef, SolverMethod};
use rd_core::units::{m, pa_s};
use rd_rotor::{
    RotorStateSpace, STATE_DIM, SpeedProfile, SystemMatrices, UnbalanceForceGenerator,
};
use rd_solver::{IntegratorOptions, JacobianKind, NewtonConfig};

use crate::error::SimResult;

/// Rotor, bearings and excitation described by `config`.
pub fn build_rotor(config: &RunConfig) -> SimResult<RotorStateSpace> {
    let rotor = &config.rotor;
    let bearing = &config.bearing;

    let geometry = BearingGeometry::new(
        m(bearing.width),
        m(bearing.diameter),
        m(bearing.clearance),
        pa_s(bearing.viscosity),
    )?;
    let matrices = SystemMatrices::jeffcott(
        rotor.journal_mass,
        rotor.mass,
        rotor.damping(),
        rotor.shaft_stiffness,
    )?;
    let speed = SpeedProfile::linear_ramp(config.run_up.f_max, config.run_up.t_max)?;
    let unbalance = UnbalanceForceGenerator::new(rotor.mass, rotor.unbalance_eccentricity, speed)?;

    let model = RotorStateSpace::new(
        &matrices,
        BearingForceAdapter::new(geometry),
        unbalance,
        config.run_up.gravity,
    )?
    .with_bearing_count(bearing.count);
    Ok(model)
}

pub fn integrator_options(solver: &SolverDef) -> IntegratorOptions {
    match solver.method {
        SolverMethod::Esdirk32 => IntegratorOptions {
            rtol: solver.rtol,
            atol: solver.atol,
            max_steps: solver.max_steps,
            min_step: solver.min_step,
            initial_step: solver.initial_step,
            max_step: solver.max_step.unwrap_or(f64::INFINITY),
            wall_clock_limit: solver
                .wall_clock_limit_s
                .and_then(|s| Duration::try_from_secs_f64(s).ok()),
            jacobian: match solver.jacobian {
                JacobianDef::Forward => JacobianKind::Forward,
                JacobianDef::Central => JacobianKind::Central,
            },
            newton: NewtonConfig::default(),
        },
    }
}

/// Every component at the configured offset, which keeps the journal off
/// the centred position where the line of centres is undefined.
pub fn initial_state(solver: &SolverDef) -> DVector<f64> {
    DVector::from_element(STATE_DIM, solver.initial_offset)
}
