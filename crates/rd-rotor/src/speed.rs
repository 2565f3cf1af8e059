//! Rotor speed law during run-up.

use std::f64::consts::PI;

use rd_core::ensure_positive;

use crate::error::RotorResult;

/// Constant angular acceleration from standstill.
///
/// ```text
/// omega(t) = alpha * t
/// angle(t) = alpha * t^2 / 2
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedProfile {
    /// Angular acceleration (rad/s²)
    alpha: f64,
}

impl SpeedProfile {
    /// Ramp that reaches `f_max` (Hz) at `t_max` (s).
    pub fn linear_ramp(f_max: f64, t_max: f64) -> RotorResult<Self> {
        let f_max = ensure_positive(f_max, "final rotor frequency")?;
        let t_max = ensure_positive(t_max, "run-up duration")?;
        Ok(Self {
            alpha: 2.0 * PI * f_max / t_max,
        })
    }

    pub fn angular_acceleration(&self) -> f64 {
        self.alpha
    }

    /// Angular speed (rad/s).
    pub fn omega(&self, t: f64) -> f64 {
        self.alpha * t
    }

    /// Rotation angle (rad).
    pub fn angle(&self, t: f64) -> f64 {
        0.5 * self.alpha * t * t
    }

    /// Rotation frequency (Hz).
    pub fn frequency(&self, t: f64) -> f64 {
        self.omega(t) / (2.0 * PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_reaches_final_frequency() {
        let s = SpeedProfile::linear_ramp(500.0, 1.0).unwrap();
        assert!((s.angular_acceleration() - 1000.0 * PI).abs() < 1e-9);
        assert!((s.frequency(1.0) - 500.0).abs() < 1e-9);
        assert!((s.frequency(0.5) - 250.0).abs() < 1e-9);
        assert_eq!(s.omega(0.0), 0.0);
        assert!((s.angle(0.1) - 0.5 * 1000.0 * PI * 0.01).abs() < 1e-9);
    }

    #[test]
    fn ramp_rejects_bad_inputs() {
        assert!(SpeedProfile::linear_ramp(0.0, 1.0).is_err());
        assert!(SpeedProfile::linear_ramp(500.0, f64::INFINITY).is_err());
    }
}
