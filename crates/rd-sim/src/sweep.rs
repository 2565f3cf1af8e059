//! Independent run-ups over a parameter range, run in parallel.

use rayon::prelude::*;
use rd_config::RunConfig;

use crate::error::SimResult;
use crate::record::RunSummary;
use crate::run::run_up;

/// Result of one sweep point. A failing point does not abort the sweep.
#[derive(Debug)]
pub struct SweepOutcome {
    pub value: f64,
    pub outcome: SimResult<RunSummary>,
}

/// Run `base` once per entry of `values`, with `apply` writing the value
/// into a copy of the configuration. Outcomes keep the order of `values`.
pub fn sweep<F>(base: &RunConfig, values: &[f64], apply: F) -> Vec<SweepOutcome>
where
    F: Fn(&mut RunConfig, f64) + Sync,
{
    values
        .par_iter()
        .map(|&value| {
            let mut config = base.clone();
            apply(&mut config, value);
            let name = format!("{}[{}]", base.name, value);
            let outcome = run_up(&config).map(|record| record.summary(&name));
            if let Err(e) = &outcome {
                tracing::warn!(value, error = %e, "sweep point failed");
            }
            SweepOutcome { value, outcome }
        })
        .collect()
}

/// Sweep over the final run-up frequency (Hz).
pub fn sweep_f_max(base: &RunConfig, f_max: &[f64]) -> Vec<SweepOutcome> {
    sweep(base, f_max, |config, f| config.run_up.f_max = f)
}
