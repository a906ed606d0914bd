//! Isotropic linear elastic material

use russell_tensor::LinElasticity;
use serde::{Deserialize, Serialize};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::math::{self, Mat6};

/// Isotropic elastic constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Isotropy {
    /// Young's modulus in Pa
    e: f64,
    /// Poisson's ratio
    nu: f64,
}

impl Isotropy {
    /// Create an isotropic material from Young's modulus and Poisson's ratio
    ///
    /// Fails unless `e > 0` and `-1 < nu < 0.5`.
    pub fn new(e: f64, nu: f64) -> HomogenizationResult<Self> {
        if !(e.is_finite() && e > 0.0) {
            return Err(HomogenizationError::InvalidMaterial(format!(
                "Young's modulus must be positive, got {e}"
            )));
        }
        if !(nu > -1.0 && nu < 0.5) {
            return Err(HomogenizationError::InvalidMaterial(format!(
                "Poisson's ratio must lie in (-1, 0.5), got {nu}"
            )));
        }
        Ok(Self { e, nu })
    }

    /// Check the constants again
    ///
    /// Values read through serde skip [`Isotropy::new`].
    pub fn validate(&self) -> HomogenizationResult<()> {
        Self::new(self.e, self.nu).map(|_| ())
    }

    /// Create an isotropic material from bulk and shear moduli
    pub fn from_bulk_shear(bulk: f64, shear: f64) -> HomogenizationResult<Self> {
        if !(bulk > 0.0 && shear > 0.0) {
            return Err(HomogenizationError::InvalidMaterial(format!(
                "bulk and shear moduli must be positive, got K = {bulk}, G = {shear}"
            )));
        }
        let e = 9.0 * bulk * shear / (3.0 * bulk + shear);
        let nu = (3.0 * bulk - 2.0 * shear) / (2.0 * (3.0 * bulk + shear));
        Self::new(e, nu)
    }

    /// Young's modulus
    pub fn youngs_modulus(&self) -> f64 {
        self.e
    }

    /// Poisson's ratio
    pub fn poisson_ratio(&self) -> f64 {
        self.nu
    }

    /// Shear modulus `E / (2 (1 + nu))`
    pub fn shear_modulus(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }

    /// Bulk modulus `E / (3 (1 - 2 nu))`
    pub fn bulk_modulus(&self) -> f64 {
        self.e / (3.0 * (1.0 - 2.0 * self.nu))
    }

    /// First Lamé parameter
    pub fn lame_lambda(&self) -> f64 {
        self.e * self.nu / ((1.0 + self.nu) * (1.0 - 2.0 * self.nu))
    }

    /// Second Lamé parameter (equal to the shear modulus)
    pub fn lame_mu(&self) -> f64 {
        self.shear_modulus()
    }

    /// Stiffness in Mandel notation
    pub fn stiffness(&self) -> Mat6 {
        let elasticity = LinElasticity::new(self.e, self.nu, false, false);
        math::mandel_from_russell(elasticity.get_modulus())
    }

    /// Compliance in Mandel notation
    pub fn compliance(&self) -> Mat6 {
        math::isotropic_stiffness(1.0 / (9.0 * self.bulk_modulus()), 1.0 / (4.0 * self.shear_modulus()))
    }
}
