//! Property-based tests for the Eshelby tensor and orientation averaging

use fiber_homogenization::prelude::*;
use proptest::prelude::*;

proptest! {
    /// Prolate and oblate branches approach the spherical closed form from both sides.
    #[test]
    fn eshelby_branches_converge_to_sphere(nu in -0.9f64..0.49, delta in 1e-3f64..2e-3) {
        let sphere = EshelbyTensor::new(nu, 1.0).unwrap().mandel();
        for a in [1.0 + delta, 1.0 - delta] {
            let near = EshelbyTensor::new(nu, a).unwrap();
            prop_assert!(near.regime() != AspectRatioRegime::Spherical);
            let diff = (near.mandel() - sphere).amax();
            prop_assert!(diff < 5e-3, "nu = {}, a = {}, diff = {}", nu, a, diff);
        }
    }

    /// Every Eshelby tensor has both minor symmetries.
    #[test]
    fn eshelby_is_minor_symmetric(nu in -0.9f64..0.49, log_a in -4.0f64..4.0) {
        let t = EshelbyTensor::new(nu, 10f64.powf(log_a)).unwrap().tensor().clone();
        prop_assert!(t.norm_diff(&t.left_minor_transpose()) < 1e-14);
        prop_assert!(t.norm_diff(&t.right_minor_transpose()) < 1e-14);
    }

    /// Closures preserve the contraction a4_ijkk = a2_ij.
    #[test]
    fn closures_preserve_second_order(x in 0.0f64..1.0, y in 0.0f64..1.0) {
        let a11 = x;
        let a22 = (1.0 - x) * y;
        let a33 = 1.0 - a11 - a22;
        let a2 = OrientationTensor2::from_diagonal(a11, a22, a33).unwrap();
        for kind in [ClosureKind::Linear, ClosureKind::Quadratic, ClosureKind::Hybrid] {
            let contracted = kind.close(&a2).trace_last_pair();
            prop_assert!((contracted - a2.matrix()).amax() < 1e-12);
        }
    }
}
