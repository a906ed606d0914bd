//! Transversely isotropic linear elastic material

use serde::{Deserialize, Serialize};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::math::{self, Mat6};

/// Transversely isotropic elastic constants
///
/// The symmetry axis is the local x1 axis, which coincides with the fiber
/// axis when the material is used for a fiber phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransverseIsotropy {
    /// Longitudinal Young's modulus in Pa
    pub e_l: f64,
    /// Transverse Young's modulus in Pa
    pub e_t: f64,
    /// Major Poisson's ratio (longitudinal load, transverse contraction)
    pub nu_lt: f64,
    /// In-plane transverse Poisson's ratio
    pub nu_tt: f64,
    /// Longitudinal shear modulus in Pa
    pub g_lt: f64,
}

impl TransverseIsotropy {
    /// Create a transversely isotropic material
    ///
    /// Fails when a modulus is not positive or the constants do not yield a
    /// positive definite stiffness.
    pub fn new(e_l: f64, e_t: f64, nu_lt: f64, nu_tt: f64, g_lt: f64) -> HomogenizationResult<Self> {
        if !(e_l > 0.0 && e_t > 0.0 && g_lt > 0.0) {
            return Err(HomogenizationError::InvalidMaterial(format!(
                "moduli must be positive, got E_l = {e_l}, E_t = {e_t}, G_lt = {g_lt}"
            )));
        }
        if !(nu_tt > -1.0 && nu_tt < 1.0) {
            return Err(HomogenizationError::InvalidMaterial(format!(
                "transverse Poisson's ratio must lie in (-1, 1), got {nu_tt}"
            )));
        }
        let material = Self {
            e_l,
            e_t,
            nu_lt,
            nu_tt,
            g_lt,
        };
        if material.compliance().cholesky().is_none() {
            return Err(HomogenizationError::InvalidMaterial(
                "transversely isotropic constants are not positive definite".to_string(),
            ));
        }
        Ok(material)
    }

    /// Check the constants again
    ///
    /// Values read through serde skip [`TransverseIsotropy::new`].
    pub fn validate(&self) -> HomogenizationResult<()> {
        Self::new(self.e_l, self.e_t, self.nu_lt, self.nu_tt, self.g_lt).map(|_| ())
    }

    /// Transverse shear modulus `E_t / (2 (1 + nu_tt))`
    pub fn g_tt(&self) -> f64 {
        self.e_t / (2.0 * (1.0 + self.nu_tt))
    }

    /// Compliance in Mandel notation
    pub fn compliance(&self) -> Mat6 {
        let mut s = Mat6::zeros();
        s[(0, 0)] = 1.0 / self.e_l;
        s[(1, 1)] = 1.0 / self.e_t;
        s[(2, 2)] = 1.0 / self.e_t;
        s[(0, 1)] = -self.nu_lt / self.e_l;
        s[(0, 2)] = -self.nu_lt / self.e_l;
        s[(1, 0)] = s[(0, 1)];
        s[(2, 0)] = s[(0, 2)];
        s[(1, 2)] = -self.nu_tt / self.e_t;
        s[(2, 1)] = s[(1, 2)];
        s[(3, 3)] = 1.0 / (2.0 * self.g_tt());
        s[(4, 4)] = 1.0 / (2.0 * self.g_lt);
        s[(5, 5)] = 1.0 / (2.0 * self.g_lt);
        s
    }

    /// Stiffness in Mandel notation
    pub fn stiffness(&self) -> HomogenizationResult<Mat6> {
        math::try_inverse_lu(&self.compliance()).ok_or_else(|| {
            HomogenizationError::SingularSystem("transversely isotropic compliance".to_string())
        })
    }
}
