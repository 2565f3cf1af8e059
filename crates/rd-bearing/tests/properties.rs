use proptest::prelude::*;
use rd_bearing::force;

const B2D: f64 = 0.5;

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * (1.0 + a.abs().max(b.abs()))
}

fn signed(range: std::ops::Range<f64>) -> impl Strategy<Value = f64> {
    (range, any::<bool>()).prop_map(|(v, neg)| if neg { -v } else { v })
}

proptest! {
    #[test]
    fn pure_rotation_matches_closed_form(eps in 0.01f64..0.95) {
        let (fr, fphi) = force(eps, 0.0, 0.0, B2D);
        let s = 1.0 - eps * eps;
        prop_assert!(close(fr, 2.0 * eps * eps / (s * s), 1e-12));
        prop_assert!(close(fphi, -std::f64::consts::PI * eps / (2.0 * s.powf(1.5)), 1e-12));
    }

    /// Scaling `(E, 1 - G)` by a positive factor scales the force by the same factor.
    #[test]
    fn positively_homogeneous_in_squeeze_speeds(
        eps in 0.05f64..0.9,
        e in signed(0.01..2.0),
        one_minus_g in signed(0.01..2.0),
        lambda in 0.2f64..5.0,
    ) {
        let base = force(eps, 0.5 * e, 0.5 * (1.0 - one_minus_g), B2D);
        let scaled = force(eps, 0.5 * lambda * e, 0.5 * (1.0 - lambda * one_minus_g), B2D);
        prop_assert!(close(scaled.0, lambda * base.0, 1e-9), "{:?} vs {:?}", scaled, base);
        prop_assert!(close(scaled.1, lambda * base.1, 1e-9), "{:?} vs {:?}", scaled, base);
    }

    #[test]
    fn continuous_across_half_frequency_whirl(
        eps in 0.05f64..0.9,
        eps_s in signed(0.05..1.0),
    ) {
        let below = force(eps, eps_s, 0.5 - 1e-9, B2D);
        let above = force(eps, eps_s, 0.5 + 1e-9, B2D);
        prop_assert!(close(below.0, above.0, 1e-6), "{:?} vs {:?}", below, above);
        prop_assert!(close(below.1, above.1, 1e-6), "{:?} vs {:?}", below, above);
    }

    #[test]
    fn continuous_across_synchronous_whirl(
        eps in 0.05f64..0.9,
        eps_s in signed(0.05..1.0),
    ) {
        let below = force(eps, eps_s, 1.0 - 1e-9, B2D);
        let above = force(eps, eps_s, 1.0 + 1e-9, B2D);
        prop_assert!(close(below.0, above.0, 1e-6));
        prop_assert!(close(below.1, above.1, 1e-6));
    }

    #[test]
    fn output_is_finite_inside_clearance(
        eps in 0.01f64..0.98,
        eps_s in -2.0f64..2.0,
        phi_s in -2.0f64..2.0,
    ) {
        let (fr, fphi) = force(eps, eps_s, phi_s, B2D);
        prop_assert!(fr.is_finite() && fphi.is_finite());
    }
}
