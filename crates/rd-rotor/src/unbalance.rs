//! Unbalance excitation during a constant-acceleration run-up.

use rd_core::{ensure_finite, ensure_positive};

use crate::error::RotorResult;
use crate::speed::SpeedProfile;

/// Force of a point unbalance `U = m e` on the rotor mass.
///
/// With rotation angle `phi` and speed `omega = phi'`, the centrifugal and
/// tangential terms are
///
/// ```text
/// Fx = U (omega^2 cos(phi) + alpha sin(phi))
/// Fy = U (omega^2 sin(phi) - alpha cos(phi))
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnbalanceForceGenerator {
    /// Unbalance (kg·m)
    unbalance: f64,
    speed: SpeedProfile,
}

impl UnbalanceForceGenerator {
    /// Unbalance of a rotor of `mass` (kg) with mass-centre offset `eccentricity` (m).
    pub fn new(mass: f64, eccentricity: f64, speed: SpeedProfile) -> RotorResult<Self> {
        let mass = ensure_positive(mass, "rotor mass")?;
        let eccentricity = ensure_finite(eccentricity, "unbalance eccentricity")?;
        Ok(Self::from_unbalance(mass * eccentricity, speed))
    }

    pub fn from_unbalance(unbalance: f64, speed: SpeedProfile) -> Self {
        Self { unbalance, speed }
    }

    pub fn unbalance(&self) -> f64 {
        self.unbalance
    }

    pub fn speed(&self) -> &SpeedProfile {
        &self.speed
    }

    /// `[Fx, Fy]` (N) at time `t`.
    pub fn force(&self, t: f64) -> [f64; 2] {
        if self.unbalance == 0.0 {
            return [0.0, 0.0];
        }
        let alpha = self.speed.angular_acceleration();
        let omega = self.speed.omega(t);
        let (sin, cos) = self.speed.angle(t).sin_cos();
        let centrifugal = omega * omega;
        [
            self.unbalance * (centrifugal * cos + alpha * sin),
            self.unbalance * (centrifugal * sin - alpha * cos),
        ]
    }
}
