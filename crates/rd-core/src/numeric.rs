use crate::RdError;

/// Absolute/relative tolerance pair.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    /// Error weight `abs + rel * |v|` used by scaled norms.
    pub fn weight(&self, v: f64) -> f64 {
        self.abs + self.rel * v.abs()
    }
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, RdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RdError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, RdError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RdError::NotPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn weight_blends_absolute_and_relative() {
        let tol = Tolerances {
            abs: 1e-6,
            rel: 1e-3,
        };
        assert_eq!(tol.weight(0.0), 1e-6);
        assert!((tol.weight(-2.0) - 2.001e-3).abs() < 1e-15);
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1e-9, "clearance").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "clearance"),
            Err(RdError::NotPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(f64::INFINITY, "clearance"),
            Err(RdError::NonFinite { .. })
        ));
    }

    proptest! {
        #[test]
        fn weight_is_even_and_positive(
            v in -1e6f64..1e6,
            abs in 1e-14f64..1e-3,
            rel in 0.0f64..1e-2,
        ) {
            let tol = Tolerances { abs, rel };
            prop_assert!(tol.weight(v) > 0.0);
            prop_assert_eq!(tol.weight(v), tol.weight(-v));
        }
    }
}
