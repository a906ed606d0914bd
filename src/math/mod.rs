//! Mathematical utilities for homogenization calculations
//!
//! Fourth-order tensor algebra runs on `russell_tensor`; 6x6 Mandel matrices
//! and their LU solves use `nalgebra`.

mod isotropic;
mod notation;
mod tensor;

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};

pub use isotropic::{
    deviatoric_projector, double_contraction, identity, isotropic_projection,
    isotropic_stiffness, volumetric_projector,
};
pub use notation::{
    mandel_factor, mandel_index, mandel_to_tensor, mandel_to_voigt_stiffness,
    symmetric_to_mandel, tensor_to_mandel, voigt_to_mandel_stiffness, MANDEL_PAIRS,
};
pub use tensor::{kronecker, mandel_from_russell, Components, Tensor4};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

/// Invert a 6x6 matrix using LU decomposition
///
/// Returns `None` when the matrix is singular or the inverse is not finite.
pub fn try_inverse_lu(m: &Mat6) -> Option<Mat6> {
    let inv = m.lu().try_inverse()?;
    inv.iter().all(|v| v.is_finite()).then_some(inv)
}

/// Solve `A X = B` for a 6x6 right-hand side using LU decomposition
pub fn solve_linear_system(a: &Mat6, b: &Mat6) -> Option<Mat6> {
    let x = a.lu().solve(b)?;
    x.iter().all(|v| v.is_finite()).then_some(x)
}

/// Compute `N M^-1` without forming the inverse
///
/// Solves `M^T X^T = N^T` with LU and transposes back.
pub fn solve_right_lu(n: &Mat6, m: &Mat6) -> Option<Mat6> {
    solve_linear_system(&m.transpose(), &n.transpose()).map(|x| x.transpose())
}

/// Largest absolute entry of a matrix difference, scaled by the largest entry of `a`
pub fn relative_difference(a: &Mat6, b: &Mat6) -> f64 {
    let scale = a.amax().max(f64::MIN_POSITIVE);
    (a - b).amax() / scale
}
