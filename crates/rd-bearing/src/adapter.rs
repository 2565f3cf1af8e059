//! Journal kinematics to Cartesian film forces.
//!
//! The journal centre is tracked in Cartesian coordinates relative to the
//! bearing centre. The force law works in the frame of the line of centres,
//! so every evaluation decomposes the position/velocity into polar form,
//! calls the short-bearing kernel, and rotates the result back.

use crate::error::{BearingError, BearingResult};
use crate::geometry::BearingGeometry;
use crate::short_bearing;

/// Journal centre displacement (m) and velocity (m/s) relative to the bearing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JournalState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl JournalState {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }
}

/// Polar decomposition of the journal motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilmKinematics {
    /// Eccentricity ratio `r / C`
    pub eps: f64,
    /// Angle of the line of centres (rad)
    pub angle: f64,
    /// `d eps / dt` (1/s)
    pub eps_dot: f64,
    /// Whirl rate of the line of centres (rad/s)
    pub angle_dot: f64,
    /// Positive speed used to make the film speeds dimensionless (rad/s)
    pub omega_ref: f64,
    /// Dimensionless radial speed
    pub eps_s: f64,
    /// Dimensionless whirl speed
    pub phi_s: f64,
}

/// Computes film forces for one bearing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingForceAdapter {
    geometry: BearingGeometry,
}

impl BearingForceAdapter {
    pub fn new(geometry: BearingGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &BearingGeometry {
        &self.geometry
    }

    /// Decompose the journal motion for rotor speed `omega` (rad/s).
    ///
    /// Returns `None` for a centred journal, where the line of centres is
    /// undefined, and for a film with neither rotation nor squeeze motion.
    ///
    /// The force law only depends on the pair `(E, 1 - G)` up to a positive
    /// factor, so `omega_ref` may be any positive speed. It is `|omega|`
    /// while the rotor turns and the squeeze speed at standstill.
    pub fn kinematics(&self, journal: &JournalState, omega: f64) -> Option<FilmKinematics> {
        let JournalState { x, y, vx, vy } = *journal;
        let r = x.hypot(y);
        if r == 0.0 {
            return None;
        }

        let clearance = self.geometry.clearance();
        let eps = r / clearance;
        let angle = y.atan2(x);
        let eps_dot = (x * vx + y * vy) / (r * clearance);
        let angle_dot = (x * vy - y * vx) / (r * r);

        let omega_ref = if omega != 0.0 {
            omega.abs()
        } else {
            (2.0 * eps_dot).hypot(2.0 * angle_dot)
        };
        if omega_ref == 0.0 {
            return None;
        }

        // 1 - G = (omega - 2 phi') / omega_ref
        let phi_s = (omega_ref - omega) / (2.0 * omega_ref) + angle_dot / omega_ref;
        // An exact +0 radial speed selects the wrong arctangent branch in the
        // kernel; -0 lands on the two-sided limit.
        let eps_s = if eps_dot == 0.0 {
            -0.0
        } else {
            eps_dot / omega_ref
        };

        Some(FilmKinematics {
            eps,
            angle,
            eps_dot,
            angle_dot,
            omega_ref,
            eps_s,
            phi_s,
        })
    }

    /// Film force `[Fx, Fy]` (N) on the journal at rotor speed `omega` (rad/s).
    ///
    /// # Errors
    /// `DomainViolation` once the journal reaches the wall (`eps >= 1`) or
    /// the force law stops being finite.
    pub fn force(&self, journal: &JournalState, omega: f64) -> BearingResult<[f64; 2]> {
        let r = journal.x.hypot(journal.y);
        if r == 0.0 {
            return Ok(self.centred_force(journal));
        }

        let Some(kin) = self.kinematics(journal, omega) else {
            return Ok([0.0, 0.0]);
        };

        let film = short_bearing::evaluate(kin.eps, kin.eps_s, kin.phi_s, self.geometry.b2d())?;
        let (radial, tangential) = film.polar();
        let scale = self.geometry.force_scale() * kin.omega_ref;

        let (sin, cos) = kin.angle.sin_cos();
        let fx = scale * (radial * cos - tangential * sin);
        let fy = scale * (radial * sin + tangential * cos);

        if !(fx.is_finite() && fy.is_finite()) {
            return Err(BearingError::DomainViolation {
                eps: kin.eps,
                what: "non-finite Cartesian force",
            });
        }
        Ok([fx, fy])
    }

    /// Analytic `eps -> 0` limit: a centred film only resists squeeze motion.
    fn centred_force(&self, journal: &JournalState) -> [f64; 2] {
        let damping = self.geometry.centred_squeeze_damping();
        [-damping * journal.vx, -damping * journal.vy]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> BearingForceAdapter {
        BearingForceAdapter::new(BearingGeometry::from_si(3.5e-3, 7e-3, 15e-6, 1e-2).unwrap())
    }

    #[test]
    fn kinematics_polar_decomposition() {
        let a = adapter();
        let journal = JournalState::new(3e-6, 4e-6, 1e-4, 0.0);
        let kin = a.kinematics(&journal, 100.0).unwrap();

        assert!((kin.eps - 5e-6 / 15e-6).abs() < 1e-12);
        assert!((kin.angle - 4f64.atan2(3.0)).abs() < 1e-12);
        // radial component of v along (0.6, 0.8)
        assert!((kin.eps_dot - 0.6e-4 / 15e-6).abs() < 1e-9);
        // tangential component -0.8e-4 over r
        assert!((kin.angle_dot + 0.8e-4 / 5e-6).abs() < 1e-9);
        assert_eq!(kin.omega_ref, 100.0);
        assert!((kin.eps_s - kin.eps_dot / 100.0).abs() < 1e-15);
        assert!((kin.phi_s - kin.angle_dot / 100.0).abs() < 1e-15);
    }

    #[test]
    fn static_journal_in_rotating_shaft_is_lifted() {
        let a = adapter();
        // journal sagging straight down, no motion
        let journal = JournalState::new(0.0, -7.5e-6, 0.0, 0.0);
        let [fx, fy] = a.force(&journal, 300.0).unwrap();

        // radial force pushes up, tangential force acts in rotation sense (+x at the bottom)
        assert!(fy > 0.0, "fy = {fy}");
        assert!(fx > 0.0, "fx = {fx}");
    }

    #[test]
    fn centred_journal_uses_squeeze_limit() {
        let a = adapter();
        let centred = a.force(&JournalState::new(0.0, 0.0, 1e-3, 2e-3), 0.0).unwrap();
        let nearby = a
            .force(&JournalState::new(1e-13, 0.0, 1e-3, 2e-3), 0.0)
            .unwrap();

        assert!((centred[0] + 0.698_422_589).abs() < 1e-6);
        for i in 0..2 {
            let rel = (centred[i] - nearby[i]).abs() / centred[i].abs();
            assert!(rel < 1e-6, "component {i}: {centred:?} vs {nearby:?}");
        }
    }

    #[test]
    fn centred_journal_at_rest_carries_no_load() {
        let a = adapter();
        assert_eq!(a.force(&JournalState::default(), 0.0).unwrap(), [0.0, 0.0]);
        assert_eq!(a.force(&JournalState::default(), 50.0).unwrap(), [0.0, 0.0]);
    }

    #[test]
    fn standstill_squeeze_matches_slow_rotation() {
        let a = adapter();
        let journal = JournalState::new(5e-6, 2e-6, 1e-4, -3e-4);
        let at_rest = a.force(&journal, 0.0).unwrap();
        let creeping = a.force(&journal, 1e-9).unwrap();
        for i in 0..2 {
            let rel = (at_rest[i] - creeping[i]).abs() / at_rest[i].abs();
            assert!(rel < 1e-6, "component {i}: {at_rest:?} vs {creeping:?}");
        }
    }

    #[test]
    fn zero_radial_speed_is_continuous() {
        let a = adapter();
        // purely tangential velocity: eps' == 0 exactly
        let exact = a
            .force(&JournalState::new(6e-6, 0.0, 0.0, 2e-4), 300.0)
            .unwrap();
        let perturbed = a
            .force(&JournalState::new(6e-6, 0.0, 1e-12, 2e-4), 300.0)
            .unwrap();
        for i in 0..2 {
            let rel = (exact[i] - perturbed[i]).abs() / exact[i].abs();
            assert!(rel < 1e-6, "component {i}: {exact:?} vs {perturbed:?}");
        }
    }

    #[test]
    fn contact_is_a_domain_violation() {
        let a = adapter();
        let err = a
            .force(&JournalState::new(15e-6, 0.0, 0.0, 1e-4), 300.0)
            .unwrap_err();
        assert!(err.is_domain_violation());
    }
}
