//! Closure approximations for the fourth-order orientation tensor
//!
//! Any function `&OrientationTensor2 -> Tensor4` can serve as a closure, so
//! external closure libraries plug in without changes to the homogenization
//! engine. The closures shipped here are the classical Advani-Tucker family.

use serde::{Deserialize, Serialize};

use crate::math::{kronecker as delta, Tensor4};

use super::OrientationTensor2;

/// Maps a second-order orientation tensor to a fourth-order one
pub trait OrientationClosure {
    /// Compute `a4` from `a2`
    fn close(&self, a2: &OrientationTensor2) -> Tensor4;
}

impl<F> OrientationClosure for F
where
    F: Fn(&OrientationTensor2) -> Tensor4,
{
    fn close(&self, a2: &OrientationTensor2) -> Tensor4 {
        self(a2)
    }
}

/// Linear (Hand) closure, exact for isotropic orientation
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearClosure;

impl OrientationClosure for LinearClosure {
    fn close(&self, a2: &OrientationTensor2) -> Tensor4 {
        let a = a2.matrix();
        Tensor4::from_fn(|i, j, k, l| {
            let isotropic = delta(i, j) * delta(k, l) + delta(i, k) * delta(j, l) + delta(i, l) * delta(j, k);
            let mixed = a[(i, j)] * delta(k, l)
                + a[(i, k)] * delta(j, l)
                + a[(i, l)] * delta(j, k)
                + a[(k, l)] * delta(i, j)
                + a[(j, l)] * delta(i, k)
                + a[(j, k)] * delta(i, l);
            -isotropic / 35.0 + mixed / 7.0
        })
    }
}

/// Quadratic closure `a_ij a_kl`, exact for perfectly aligned fibers
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticClosure;

impl OrientationClosure for QuadraticClosure {
    fn close(&self, a2: &OrientationTensor2) -> Tensor4 {
        Tensor4::dyadic(a2.matrix(), a2.matrix())
    }
}

/// Hybrid closure blending linear and quadratic with `f = 1 - 27 det(a)`
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridClosure;

impl OrientationClosure for HybridClosure {
    fn close(&self, a2: &OrientationTensor2) -> Tensor4 {
        let f = (1.0 - 27.0 * a2.matrix().determinant()).clamp(0.0, 1.0);
        (1.0 - f) * LinearClosure.close(a2) + f * QuadraticClosure.close(a2)
    }
}

/// Selector for the built-in closures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClosureKind {
    /// Linear closure
    Linear,
    /// Quadratic closure
    Quadratic,
    /// Hybrid closure
    #[default]
    Hybrid,
}

impl OrientationClosure for ClosureKind {
    fn close(&self, a2: &OrientationTensor2) -> Tensor4 {
        match self {
            Self::Linear => LinearClosure.close(a2),
            Self::Quadratic => QuadraticClosure.close(a2),
            Self::Hybrid => HybridClosure.close(a2),
        }
    }
}
