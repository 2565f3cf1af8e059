//! Run-up driver.

use rd_config::{RunConfig, validate_config};
use rd_rotor::RotorState;
use rd_solver::{Esdirk32, StepProgress};

use crate::builder::{build_rotor, initial_state, integrator_options};
use crate::error::SimResult;
use crate::record::RunUpRecord;

/// Integrate the run-up described by `config` and sample it on the
/// configured output grid.
pub fn run_up(config: &RunConfig) -> SimResult<RunUpRecord> {
    run_up_with_progress(config, None)
}

/// Like [`run_up`], reporting every accepted step to `progress`.
///
/// # Errors
/// - `Config` for an invalid configuration
/// - `Rotor` when the model cannot be assembled
/// - `DomainViolation` when the journal reaches the bearing wall
/// - `IntegrationFailure` when a step, step-size or wall-clock budget runs out
pub fn run_up_with_progress(
    config: &RunConfig,
    progress: Option<&mut dyn FnMut(StepProgress)>,
) -> SimResult<RunUpRecord> {
    validate_config(config)?;
    let rotor = build_rotor(config)?;
    let integrator = Esdirk32::new(integrator_options(&config.solver));
    let x0 = initial_state(&config.solver);
    let t_eval = config.run_up.sample_times();

    tracing::info!(
        name = %config.name,
        t_max = config.run_up.t_max,
        f_max = config.run_up.f_max,
        samples = t_eval.len(),
        "starting run-up"
    );

    let solution = integrator.integrate_with_progress(&rotor, &x0, &t_eval, progress)?;

    let states = solution
        .x
        .iter()
        .map(|x| RotorState::from_column_slice(x.as_slice()))
        .collect();
    let record = RunUpRecord {
        t: solution.t,
        states,
        stats: solution.stats,
        clearance: config.bearing.clearance,
        speed: *rotor.speed(),
    };

    tracing::info!(
        name = %config.name,
        accepted = record.stats.accepted_steps,
        rejected = record.stats.rejected_steps,
        max_eps = record.max_eccentricity(),
        wall_time_s = record.stats.wall_time_s,
        "run-up finished"
    );
    Ok(record)
}
