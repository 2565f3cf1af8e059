//! rd-core: shared foundation for the rotordynamics workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, physical constants)
//! - numeric (tolerances + finiteness checks)
//! - timing (wall-clock timer for run reports)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::RdError;
pub use numeric::*;
pub use timing::Timer;
pub use units::*;
