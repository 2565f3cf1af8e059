//! Layout of the 8-component rotor state.
//!
//! `[xj, xm, yj, ym, xj', xm', yj', ym']`: journal and rotor-mass
//! displacements in x and y, followed by their velocities.

use nalgebra::SVector;
use rd_bearing::JournalState;

/// Lateral degrees of freedom.
pub const DOF: usize = 4;
pub const STATE_DIM: usize = 2 * DOF;

pub const XJ: usize = 0;
pub const XM: usize = 1;
pub const YJ: usize = 2;
pub const YM: usize = 3;
pub const VXJ: usize = 4;
pub const VXM: usize = 5;
pub const VYJ: usize = 6;
pub const VYM: usize = 7;

pub type RotorState = SVector<f64, STATE_DIM>;

/// Journal displacement and velocity.
pub fn journal(state: &RotorState) -> JournalState {
    JournalState::new(state[XJ], state[YJ], state[VXJ], state[VYJ])
}

/// Rotor-mass displacement `(xm, ym)`.
pub fn mass_position(state: &RotorState) -> (f64, f64) {
    (state[XM], state[YM])
}
