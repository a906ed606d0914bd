//! Second-order fiber orientation tensor

use serde::{Deserialize, Serialize};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::math::{Mat3, Vec3};

/// Default tolerance for the convenience constructors
const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Validated second-order orientation tensor `a_ij = <p_i p_j>`
///
/// Symmetric, unit trace and positive semi-definite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationTensor2 {
    a: Mat3,
}

impl OrientationTensor2 {
    /// Validate and wrap a 3x3 orientation tensor
    ///
    /// # Arguments
    /// * `a` - Candidate tensor
    /// * `tolerance` - Allowed asymmetry, trace defect and negative eigenvalue
    pub fn new(a: Mat3, tolerance: f64) -> HomogenizationResult<Self> {
        if a.iter().any(|v| !v.is_finite()) {
            return Err(HomogenizationError::OrientationTensor(
                "components must be finite".to_string(),
            ));
        }
        let asymmetry = (a - a.transpose()).amax();
        if asymmetry > tolerance {
            return Err(HomogenizationError::OrientationTensor(format!(
                "tensor is not symmetric (max |a_ij - a_ji| = {asymmetry:e})"
            )));
        }
        let trace = a.trace();
        if (trace - 1.0).abs() > tolerance {
            return Err(HomogenizationError::OrientationTensor(format!(
                "trace must be 1, got {trace}"
            )));
        }
        let sym = 0.5 * (a + a.transpose());
        let min_eigenvalue = sym.symmetric_eigenvalues().min();
        if min_eigenvalue < -tolerance {
            return Err(HomogenizationError::OrientationTensor(format!(
                "tensor is not positive semi-definite (eigenvalue {min_eigenvalue})"
            )));
        }
        Ok(Self { a: sym })
    }

    /// Diagonal orientation tensor in the principal frame
    pub fn from_diagonal(a11: f64, a22: f64, a33: f64) -> HomogenizationResult<Self> {
        Self::new(Mat3::from_diagonal(&Vec3::new(a11, a22, a33)), DEFAULT_TOLERANCE)
    }

    /// All fibers along `axis`
    pub fn aligned(axis: &Vec3) -> HomogenizationResult<Self> {
        let norm = axis.norm();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(HomogenizationError::OrientationTensor(
                "alignment axis must be a non-zero vector".to_string(),
            ));
        }
        let p = axis / norm;
        Self::new(p * p.transpose(), DEFAULT_TOLERANCE)
    }

    /// Random orientation in three dimensions, `a = I / 3`
    pub fn isotropic() -> Self {
        Self {
            a: Mat3::identity() / 3.0,
        }
    }

    /// Random orientation within the x1-x2 plane
    pub fn planar_isotropic() -> Self {
        Self {
            a: Mat3::from_diagonal(&Vec3::new(0.5, 0.5, 0.0)),
        }
    }

    /// The tensor components
    pub fn matrix(&self) -> &Mat3 {
        &self.a
    }

    /// Eigenvalues in ascending order
    pub fn principal_values(&self) -> Vec3 {
        let mut values = self.a.symmetric_eigenvalues();
        values.as_mut_slice().sort_by(|x, y| x.total_cmp(y));
        values
    }
}
