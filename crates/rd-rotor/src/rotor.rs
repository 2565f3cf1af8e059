//! Nonlinear rotor derivative with bearing and unbalance forcing.

use nalgebra::{DVector, Vector4};
use rd_bearing::BearingForceAdapter;
use rd_core::ensure_finite;
use rd_solver::OdeSystem;

use crate::error::{RotorError, RotorResult};
use crate::matrices::SystemMatrices;
use crate::speed::SpeedProfile;
use crate::state::{self, RotorState, STATE_DIM, VYJ, VYM};
use crate::state_space::StateSpaceModel;
use crate::unbalance::UnbalanceForceGenerator;

/// Symmetric rotor carried by identical journal bearings.
///
/// ```text
/// x' = A x + [0; M^-1 F(t, x)] - g e_y
/// F  = [n Fb_x, Fu_x, n Fb_y, Fu_y]
/// ```
///
/// `Fb` is the film force of one bearing at the journal, `n` the number of
/// bearings and `Fu` the unbalance force on the rotor mass. Gravity acts
/// along -y on journal and rotor mass.
#[derive(Clone, Debug)]
pub struct RotorStateSpace {
    model: StateSpaceModel,
    bearing: BearingForceAdapter,
    bearing_count: usize,
    unbalance: UnbalanceForceGenerator,
    speed: SpeedProfile,
    gravity: f64,
}

impl RotorStateSpace {
    /// Rotor on two bearings, driven by the unbalance generator's speed law.
    pub fn new(
        matrices: &SystemMatrices,
        bearing: BearingForceAdapter,
        unbalance: UnbalanceForceGenerator,
        gravity: f64,
    ) -> RotorResult<Self> {
        matrices.validate()?;
        let model = StateSpaceModel::from_matrices(matrices)?;
        let gravity = ensure_finite(gravity, "gravitational acceleration")?;
        Ok(Self {
            model,
            bearing,
            bearing_count: 2,
            speed: *unbalance.speed(),
            unbalance,
            gravity,
        })
    }

    /// Change the number of identical bearings sharing the journal load.
    pub fn with_bearing_count(mut self, count: usize) -> Self {
        self.bearing_count = count;
        self
    }

    pub fn model(&self) -> &StateSpaceModel {
        &self.model
    }

    pub fn bearing(&self) -> &BearingForceAdapter {
        &self.bearing
    }

    pub fn bearing_count(&self) -> usize {
        self.bearing_count
    }

    pub fn speed(&self) -> &SpeedProfile {
        &self.speed
    }

    pub fn unbalance(&self) -> &UnbalanceForceGenerator {
        &self.unbalance
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Total film force `[Fx, Fy]` (N) of all bearings on the journal.
    pub fn bearing_force(&self, t: f64, state: &RotorState) -> RotorResult<[f64; 2]> {
        let [fx, fy] = self
            .bearing
            .force(&state::journal(state), self.speed.omega(t))?;
        let n = self.bearing_count as f64;
        Ok([n * fx, n * fy])
    }

    /// State derivative at `(t, state)`.
    ///
    /// # Errors
    /// `InvalidState` for a wrong-length or non-finite state; `Bearing` when
    /// the film force cannot be evaluated (journal at the wall).
    pub fn derivative(&self, t: f64, state: &[f64]) -> RotorResult<[f64; STATE_DIM]> {
        let x = checked_state(state)?;
        let [bx, by] = self.bearing_force(t, &x)?;
        let [ux, uy] = self.unbalance.force(t);

        let forces = Vector4::new(bx, ux, by, uy);
        let mut dx = self.model.a() * x + self.model.forcing(&forces);
        dx[VYJ] -= self.gravity;
        dx[VYM] -= self.gravity;

        let mut out = [0.0; STATE_DIM];
        out.copy_from_slice(dx.as_slice());
        Ok(out)
    }
}

fn checked_state(state: &[f64]) -> RotorResult<RotorState> {
    if state.len() != STATE_DIM {
        return Err(RotorError::InvalidState {
            what: format!("expected {STATE_DIM} components, got {}", state.len()),
        });
    }
    if let Some(i) = state.iter().position(|v| !v.is_finite()) {
        return Err(RotorError::InvalidState {
            what: format!("component {i} is {}", state[i]),
        });
    }
    Ok(RotorState::from_column_slice(state))
}

impl OdeSystem for RotorStateSpace {
    type Error = RotorError;

    fn dim(&self) -> usize {
        STATE_DIM
    }

    fn rhs(&self, t: f64, x: &DVector<f64>) -> RotorResult<DVector<f64>> {
        let dx = self.derivative(t, x.as_slice())?;
        Ok(DVector::from_column_slice(&dx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{VXJ, VXM, XJ, XM, YJ};
    use rd_bearing::BearingGeometry;

    fn rotor(eccentricity: f64) -> RotorStateSpace {
        let matrices = SystemMatrices::jeffcott(1e-5, 0.1, 1e-2 * (1e5_f64 * 0.1).sqrt(), 1e5)
            .unwrap();
        let geometry = BearingGeometry::from_si(3.5e-3, 7e-3, 15e-6, 1e-2).unwrap();
        let speed = SpeedProfile::linear_ramp(500.0, 1.0).unwrap();
        let unbalance = UnbalanceForceGenerator::new(0.1, eccentricity, speed).unwrap();
        RotorStateSpace::new(&matrices, BearingForceAdapter::new(geometry), unbalance, 9.81)
            .unwrap()
    }

    #[test]
    fn resting_centred_rotor_only_feels_gravity() {
        let dx = rotor(0.0).derivative(0.0, &[0.0; STATE_DIM]).unwrap();
        assert_eq!(dx, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -9.81, -9.81]);
    }

    #[test]
    fn positions_integrate_velocities() {
        let state = [1e-6, 2e-6, -1e-6, 0.5e-6, 1e-3, -2e-3, 3e-3, 4e-3];
        let dx = rotor(1e-6).derivative(0.01, &state).unwrap();
        assert_eq!(&dx[..4], &state[4..]);
    }

    #[test]
    fn shaft_spring_pulls_disc_towards_journal() {
        // disc displaced in +x, journal centred: disc accelerates back at -k/m
        let mut state = [0.0; STATE_DIM];
        state[XM] = 1e-6;
        let dx = rotor(0.0).derivative(0.0, &state).unwrap();
        assert!((dx[VXM] + 1e5 * 1e-6 / 0.1).abs() < 1e-9);
        // and the journal towards the disc
        assert!(dx[VXJ] > 0.0);
    }

    #[test]
    fn bearings_lift_a_sagging_journal() {
        let mut state = [0.0; STATE_DIM];
        state[YJ] = -7.5e-6;
        let r = rotor(0.0);
        let [fx, fy] = r.bearing_force(0.1, &RotorState::from_column_slice(&state)).unwrap();
        assert!(fy > 0.0);

        let one = r
            .bearing()
            .force(&state::journal(&RotorState::from_column_slice(&state)), r.speed().omega(0.1))
            .unwrap();
        assert!((fx - 2.0 * one[0]).abs() < 1e-12 * fx.abs().max(1.0));
        assert!((fy - 2.0 * one[1]).abs() < 1e-12 * fy.abs());
    }

    #[test]
    fn invalid_states_are_rejected() {
        let r = rotor(1e-6);
        assert!(matches!(
            r.derivative(0.0, &[0.0; 7]),
            Err(RotorError::InvalidState { .. })
        ));

        let mut state = [0.0; STATE_DIM];
        state[3] = f64::NAN;
        assert!(matches!(
            r.derivative(0.0, &state),
            Err(RotorError::InvalidState { .. })
        ));
    }

    #[test]
    fn journal_contact_is_a_domain_violation() {
        let mut state = [0.0; STATE_DIM];
        state[XJ] = 20e-6;
        let err = rotor(1e-6).derivative(0.1, &state).unwrap_err();
        assert!(err.is_domain_violation());
    }

    #[test]
    fn ode_rhs_matches_derivative() {
        let r = rotor(1e-6);
        let state = [1e-6, 2e-6, -1e-6, 0.5e-6, 1e-3, -2e-3, 3e-3, 4e-3];
        let direct = r.derivative(0.02, &state).unwrap();
        let via_trait = r.rhs(0.02, &DVector::from_column_slice(&state)).unwrap();
        assert_eq!(r.dim(), STATE_DIM);
        assert_eq!(via_trait.as_slice(), &direct);
    }
}
