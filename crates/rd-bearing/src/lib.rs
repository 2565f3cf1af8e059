//! Hydrodynamic journal bearing forces from short-bearing theory.
//!
//! Provides:
//! - the closed-form short-bearing force law (`short_bearing`)
//! - immutable bearing geometry and oil properties (`geometry`)
//! - the adapter from journal kinematics to Cartesian film forces (`adapter`)

pub mod adapter;
pub mod error;
pub mod geometry;
pub mod short_bearing;

pub use adapter::{BearingForceAdapter, FilmKinematics, JournalState};
pub use error::{BearingError, BearingResult};
pub use geometry::BearingGeometry;
pub use short_bearing::{FilmForce, ForceCase, Kappa, evaluate, force};
