//! Mandel and Voigt notation conversions
//!
//! Mandel is the canonical 6x6 notation of this crate. Components are ordered
//! 11, 22, 33, 23, 13, 12; normal-shear blocks carry a factor sqrt(2) and the
//! shear-shear block a factor 2, so that the double contraction of two
//! fourth-order tensors equals the product of their Mandel matrices.
//!
//! Voigt stiffness matrices use the same ordering without any scaling.

use std::f64::consts::SQRT_2;

use super::{Mat3, Mat6, Tensor4, Vec6};

/// Index pairs of the six Mandel components
pub const MANDEL_PAIRS: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (1, 2), (0, 2), (0, 1)];

/// Mandel index of the symmetric index pair `(i, j)`
pub fn mandel_index(i: usize, j: usize) -> usize {
    match (i.min(j), i.max(j)) {
        (a, b) if a == b => a,
        (1, 2) => 3,
        (0, 2) => 4,
        _ => 5,
    }
}

/// Scaling of a Mandel component (1 for normal, sqrt(2) for shear)
pub fn mandel_factor(m: usize) -> f64 {
    if m < 3 {
        1.0
    } else {
        SQRT_2
    }
}

/// Convert a fourth-order tensor to its Mandel matrix
///
/// Only the minor-symmetric part of the tensor is representable; the skew
/// part is dropped.
pub fn tensor_to_mandel(t: &Tensor4) -> Mat6 {
    t.to_mandel()
}

/// Convert a Mandel matrix to the full fourth-order tensor
pub fn mandel_to_tensor(m: &Mat6) -> Tensor4 {
    Tensor4::from_mandel(m)
}

/// Convert a Mandel stiffness to a Voigt stiffness (engineering shear strains)
pub fn mandel_to_voigt_stiffness(m: &Mat6) -> Mat6 {
    Mat6::from_fn(|a, b| m[(a, b)] / (mandel_factor(a) * mandel_factor(b)))
}

/// Convert a Voigt stiffness to a Mandel stiffness
pub fn voigt_to_mandel_stiffness(v: &Mat6) -> Mat6 {
    Mat6::from_fn(|a, b| v[(a, b)] * mandel_factor(a) * mandel_factor(b))
}

/// Mandel vector of a symmetric second-order tensor
pub fn symmetric_to_mandel(s: &Mat3) -> Vec6 {
    Vec6::from_fn(|a, _| {
        let (i, j) = MANDEL_PAIRS[a];
        mandel_factor(a) * 0.5 * (s[(i, j)] + s[(j, i)])
    })
}
