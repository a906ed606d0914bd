//! Orientation averaging of transversely isotropic fourth-order tensors
//!
//! A tensor `T` that is transversely isotropic about the fiber direction `p`
//! and minor-symmetric is a linear combination of six basis tensors built from
//! `p` and the identity. Averaging over the fiber distribution replaces
//! `<p_i p_j>` by `a2` and `<p_i p_j p_k p_l>` by `a4` (Advani and Tucker, 1987).
//! The two coupling coefficients `b2` and `b3` are kept apart, so tensors
//! without major symmetry (concentration tensors) are averaged correctly too.

use crate::math::{kronecker as delta, mandel_to_tensor, tensor_to_mandel, Mat3, Mat6, Tensor4, Vec3};

use super::{OrientationClosure, OrientationTensor2};

/// Coefficients of a transversely isotropic tensor with symmetry axis x1
#[derive(Debug, Clone, Copy)]
struct TransverseCoefficients {
    b1: f64,
    b2: f64,
    b3: f64,
    b4: f64,
    b5: f64,
    b6: f64,
}

impl TransverseCoefficients {
    fn from_aligned(t: &Tensor4) -> Self {
        let t1111 = t.get(0, 0, 0, 0);
        let t1122 = t.get(0, 0, 1, 1);
        let t2211 = t.get(1, 1, 0, 0);
        let t2222 = t.get(1, 1, 1, 1);
        let t2233 = t.get(1, 1, 2, 2);
        let t1212 = t.get(0, 1, 0, 1);

        let b5 = t2222 - t2233;
        Self {
            b1: t1111 - t1122 - t2211 + t2222 - 4.0 * t1212,
            b2: t1122 - t2233,
            b3: t2211 - t2233,
            b4: t2233,
            b5,
            b6: t1212 - 0.5 * b5,
        }
    }

    fn assemble(&self, a2: &Mat3, a4: &Tensor4) -> Tensor4 {
        Tensor4::from_fn(|i, j, k, l| {
            self.b1 * a4.get(i, j, k, l)
                + self.b2 * a2[(i, j)] * delta(k, l)
                + self.b3 * delta(i, j) * a2[(k, l)]
                + self.b4 * delta(i, j) * delta(k, l)
                + self.b5 * 0.5 * (delta(i, k) * delta(j, l) + delta(i, l) * delta(j, k))
                + self.b6
                    * (a2[(i, k)] * delta(j, l)
                        + a2[(i, l)] * delta(j, k)
                        + a2[(j, l)] * delta(i, k)
                        + a2[(j, k)] * delta(i, l))
        })
    }
}

/// Orientation average of a tensor given in the fiber-aligned frame
///
/// # Arguments
/// * `t` - Tensor, transversely isotropic about x1
/// * `a2` - Second-order orientation tensor
/// * `a4` - Fourth-order orientation tensor
pub fn orientation_average(t: &Tensor4, a2: &Mat3, a4: &Tensor4) -> Tensor4 {
    TransverseCoefficients::from_aligned(t).assemble(a2, a4)
}

/// Orientation average of a tensor given as a Mandel matrix
pub fn orientation_average_mandel(m: &Mat6, a2: &Mat3, a4: &Tensor4) -> Mat6 {
    tensor_to_mandel(&orientation_average(&mandel_to_tensor(m), a2, a4))
}

/// Orientation average using a closure for the fourth-order tensor
pub fn average_with_closure(t: &Tensor4, a2: &OrientationTensor2, closure: &dyn OrientationClosure) -> Tensor4 {
    orientation_average(t, a2.matrix(), &closure.close(a2))
}

/// Relative deviation of `t` from transverse isotropy about x1
///
/// Zero for tensors the averaging formula represents exactly.
pub fn transverse_isotropy_residual(t: &Tensor4) -> f64 {
    let e1 = Vec3::x();
    let rebuilt = orientation_average(t, &(e1 * e1.transpose()), &Tensor4::outer4(&e1));
    let scale = t.norm().max(f64::MIN_POSITIVE);
    rebuilt.norm_diff(t) / scale
}
