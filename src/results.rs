//! Result types for homogenization

use serde::{Deserialize, Serialize};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::eshelby::AspectRatioRegime;
use crate::math::{self, Mat6, Tensor4, Vec3};

/// Relative symmetry residuals of a fourth-order tensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetryReport {
    /// `|C_ijkl - C_jikl| / |C|`
    pub left_minor: f64,
    /// `|C_ijkl - C_ijlk| / |C|`
    pub right_minor: f64,
    /// `|C_ijkl - C_klij| / |C|`
    pub major: f64,
}

impl SymmetryReport {
    /// Compute the residuals of a tensor
    pub fn of(t: &Tensor4) -> Self {
        let scale = t.norm().max(f64::MIN_POSITIVE);
        Self {
            left_minor: t.norm_diff(&t.left_minor_transpose()) / scale,
            right_minor: t.norm_diff(&t.right_minor_transpose()) / scale,
            major: t.norm_diff(&t.major_transpose()) / scale,
        }
    }

    /// Whether both minor symmetries hold within `tolerance`
    pub fn has_minor_symmetry(&self, tolerance: f64) -> bool {
        self.left_minor <= tolerance && self.right_minor <= tolerance
    }

    /// Whether major symmetry holds within `tolerance`
    pub fn has_major_symmetry(&self, tolerance: f64) -> bool {
        self.major <= tolerance
    }

    /// Whether all symmetries hold within `tolerance`
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.has_minor_symmetry(tolerance) && self.has_major_symmetry(tolerance)
    }
}

/// Effective stiffness of a homogenized composite
///
/// Stored in Mandel notation. Minor symmetry is therefore built in, while
/// major symmetry is not guaranteed: the generalized Mori-Tanaka scheme with
/// several non-isotropic phases or orientation states may return an
/// asymmetric 6x6 matrix. As noted for the method, the source research domain
/// explicitly flags potential thermodynamic-consistency violations (asymmetric
/// stiffness) as a known, unresolved modeling limitation rather than an
/// implementation bug. [`EffectiveStiffness::symmetrized`] is an opt-in
/// post-processing step for callers that need a symmetric tensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStiffness {
    mandel: Mat6,
}

impl EffectiveStiffness {
    /// Wrap a stiffness given in Mandel notation
    pub fn from_mandel(mandel: Mat6) -> Self {
        Self { mandel }
    }

    /// Stiffness in Mandel notation
    pub fn mandel(&self) -> &Mat6 {
        &self.mandel
    }

    /// Stiffness in Voigt notation (engineering shear strains)
    pub fn voigt(&self) -> Mat6 {
        math::mandel_to_voigt_stiffness(&self.mandel)
    }

    /// Full fourth-order stiffness tensor
    pub fn tensor(&self) -> Tensor4 {
        math::mandel_to_tensor(&self.mandel)
    }

    /// Compliance in Mandel notation
    pub fn compliance(&self) -> HomogenizationResult<Mat6> {
        math::try_inverse_lu(&self.mandel).ok_or_else(|| {
            HomogenizationError::SingularSystem("effective stiffness is not invertible".to_string())
        })
    }

    /// Young's modulus along `direction`, `1 / (n n : S : n n)`
    pub fn youngs_modulus(&self, direction: &Vec3) -> HomogenizationResult<f64> {
        let norm = direction.norm();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(HomogenizationError::InvalidInput(
                "direction must be a non-zero vector".to_string(),
            ));
        }
        let n = direction / norm;
        let m = math::symmetric_to_mandel(&(n * n.transpose()));
        let s = self.compliance()?;
        Ok(1.0 / m.dot(&(s * m)))
    }

    /// Residuals of minor and major symmetry
    pub fn symmetry_report(&self) -> SymmetryReport {
        SymmetryReport::of(&self.tensor())
    }

    /// Major-symmetric part `(C + C^T) / 2`
    ///
    /// Discards the asymmetric part of the result; energy consistency of the
    /// original tensor is not restored by this projection.
    pub fn symmetrized(&self) -> Self {
        Self {
            mandel: 0.5 * (self.mandel + self.mandel.transpose()),
        }
    }

    /// Bulk and shear modulus of the closest isotropic stiffness
    pub fn isotropic_moduli(&self) -> (f64, f64) {
        math::isotropic_projection(&self.mandel)
    }
}

/// Concentration tensors of one fiber phase, in Mandel notation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseConcentration {
    /// Eshelby branch used for the phase
    pub regime: AspectRatioRegime,
    /// Dilute strain concentration `A = [I + S C_m^-1 (C_r - C_m)]^-1` in the fiber frame
    pub dilute: Mat6,
    /// Orientation average `<A>`
    pub averaged: Mat6,
    /// Orientation average of the polarization `<(C_r - C_m) A>`
    pub averaged_polarization: Mat6,
}

impl PhaseConcentration {
    /// Symmetry residuals of the averaged concentration tensor
    pub fn symmetry_report(&self) -> SymmetryReport {
        SymmetryReport::of(&math::mandel_to_tensor(&self.averaged))
    }
}
