//! Isotropic fourth-order tensors in Mandel notation

use super::Mat6;

/// Identity on symmetric second-order tensors
pub fn identity() -> Mat6 {
    Mat6::identity()
}

/// Volumetric projector `P1 = 1/3 I (x) I`
pub fn volumetric_projector() -> Mat6 {
    let mut p = Mat6::zeros();
    for i in 0..3 {
        for j in 0..3 {
            p[(i, j)] = 1.0 / 3.0;
        }
    }
    p
}

/// Deviatoric projector `P2 = I_s - P1`
pub fn deviatoric_projector() -> Mat6 {
    identity() - volumetric_projector()
}

/// Isotropic stiffness `3K P1 + 2G P2`
///
/// # Arguments
/// * `bulk` - Bulk modulus K
/// * `shear` - Shear modulus G
pub fn isotropic_stiffness(bulk: f64, shear: f64) -> Mat6 {
    3.0 * bulk * volumetric_projector() + 2.0 * shear * deviatoric_projector()
}

/// Full double contraction `A :: B` of two tensors in Mandel form
pub fn double_contraction(a: &Mat6, b: &Mat6) -> f64 {
    a.component_mul(b).sum()
}

/// Project a stiffness onto the isotropic subspace
///
/// Returns `(bulk, shear)` of the closest isotropic tensor.
pub fn isotropic_projection(c: &Mat6) -> (f64, f64) {
    let three_k = double_contraction(&volumetric_projector(), c);
    let two_g = double_contraction(&deviatoric_projector(), c) / 5.0;
    (three_k / 3.0, two_g / 2.0)
}
