//! Run-up simulation of a Jeffcott rotor on short journal bearings.
//!
//! Provides:
//! - assembly of the rotor model and integrator from a `RunConfig`
//! - the run-up driver with progress reporting
//! - result records with eccentricity/orbit post-processing and CSV export
//! - parallel parameter sweeps

pub mod builder;
pub mod error;
pub mod record;
pub mod run;
pub mod sweep;

pub use builder::{build_rotor, initial_state, integrator_options};
pub use error::{SimError, SimResult};
pub use record::{RunSummary, RunUpRecord};
pub use run::{run_up, run_up_with_progress};
pub use sweep::{SweepOutcome, sweep, sweep_f_max};
