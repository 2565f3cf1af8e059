//! Rigid (Jeffcott) rotor on hydrodynamic journal bearings.
//!
//! Provides:
//! - mass/damping/stiffness matrices of the symmetric rotor (`matrices`)
//! - the first-order state-space form (`state_space`)
//! - the run-up speed law and unbalance excitation (`speed`, `unbalance`)
//! - the nonlinear state derivative driven by bearing forces (`rotor`)

pub mod error;
pub mod matrices;
pub mod rotor;
pub mod speed;
pub mod state;
pub mod state_space;
pub mod unbalance;

pub use error::{RotorError, RotorResult};
pub use matrices::{Matrix4, SystemMatrices};
pub use rotor::RotorStateSpace;
pub use speed::SpeedProfile;
pub use state::{DOF, RotorState, STATE_DIM};
pub use state_space::{Matrix8, StateSpaceModel};
pub use unbalance::UnbalanceForceGenerator;
