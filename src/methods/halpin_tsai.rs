//! Halpin-Tsai lamina estimate with a Cox shear-lag correction
//!
//! The longitudinal modulus uses Cox's shear-lag model for short fibers, the
//! transverse and shear moduli use the Halpin-Tsai equations. The result is a
//! unidirectional lamina described by `E11`, `E22`, `G12` and `nu12`.

use serde::{Deserialize, Serialize};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::materials::{Isotropy, Material};
use crate::math::Mat3;

/// Packing arrangement of fibers in the cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FiberPacking {
    /// Hexagonal array, `p = 1/2 ln(2 pi / (sqrt(3) phi))`
    #[default]
    Hexagonal,
    /// Square array, `p = 1/2 ln(pi / phi)`
    Square,
}

impl FiberPacking {
    /// Shear-lag packing parameter `ln(R / r_f)` for a fiber volume fraction
    pub fn parameter(self, volume_fraction: f64) -> f64 {
        match self {
            Self::Hexagonal => 0.5 * (2.0 * std::f64::consts::PI / (3f64.sqrt() * volume_fraction)).ln(),
            Self::Square => 0.5 * (std::f64::consts::PI / volume_fraction).ln(),
        }
    }
}

/// `1 - tanh(x) / x`, continued by its series near zero
fn shear_lag_efficiency(x: f64) -> f64 {
    if x < 1e-6 {
        x * x / 3.0
    } else {
        1.0 - x.tanh() / x
    }
}

/// Effective unidirectional lamina from Halpin-Tsai and shear-lag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalpinTsai {
    e11: f64,
    e22: f64,
    g12: f64,
    nu12: f64,
    nu21: f64,
}

impl HalpinTsai {
    /// Compute the lamina constants for an isotropic fiber
    ///
    /// # Arguments
    /// * `fiber` - Fiber material
    /// * `matrix` - Matrix material
    /// * `aspect_ratio` - Fiber length over diameter, `s > 0`
    /// * `volume_fraction` - Fiber volume fraction in `[0, 1]`
    /// * `packing` - Cross-section packing used by the shear-lag model
    pub fn new(
        fiber: &Isotropy,
        matrix: &Isotropy,
        aspect_ratio: f64,
        volume_fraction: f64,
        packing: FiberPacking,
    ) -> HomogenizationResult<Self> {
        Self::from_material(&Material::from(*fiber), matrix, aspect_ratio, volume_fraction, packing)
    }

    /// Compute the lamina constants for an isotropic or transversely isotropic fiber
    ///
    /// A transversely isotropic fiber enters the shear-lag term with `E_L`, the
    /// transverse estimate with `E_T`, the shear estimate with `G_LT` and the
    /// Poisson mixture with `nu_LT`.
    pub fn from_material(
        fiber: &Material,
        matrix: &Isotropy,
        aspect_ratio: f64,
        volume_fraction: f64,
        packing: FiberPacking,
    ) -> HomogenizationResult<Self> {
        fiber.validate()?;
        matrix.validate()?;
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(HomogenizationError::InvalidGeometry(format!(
                "fiber aspect ratio must be positive and finite, got {aspect_ratio}"
            )));
        }
        if !(volume_fraction.is_finite() && (0.0..=1.0).contains(&volume_fraction)) {
            return Err(HomogenizationError::InvalidFraction(format!(
                "fiber volume fraction must lie in [0, 1], got {volume_fraction}"
            )));
        }

        let phi = volume_fraction;
        let (e_l, e_t, g_f, nu_f) = match fiber {
            Material::Isotropic(iso) => (
                iso.youngs_modulus(),
                iso.youngs_modulus(),
                iso.shear_modulus(),
                iso.poisson_ratio(),
            ),
            Material::TransverselyIsotropic(ti) => (ti.e_l, ti.e_t, ti.g_lt, ti.nu_lt),
        };
        let (e_m, g_m, nu_m) = (matrix.youngs_modulus(), matrix.shear_modulus(), matrix.poisson_ratio());

        // phi = 0 gives an infinite packing parameter and x = 0
        let x = aspect_ratio * (2.0 * g_m / (e_l * packing.parameter(phi))).sqrt();
        let e11 = e_l * shear_lag_efficiency(x) * phi + e_m * (1.0 - phi);

        let eta_e = (e_t / e_m - 1.0) / (e_t / e_m + 2.0);
        let e22 = e_m * (1.0 + 2.0 * eta_e * phi) / (1.0 - eta_e * phi);

        let eta_g = (g_f / g_m - 1.0) / (g_f / g_m + 1.0);
        let g12 = g_m * (1.0 + 2.0 * eta_g * phi) / (1.0 - eta_g * phi);

        let nu12 = nu_f * phi + nu_m * (1.0 - phi);
        let nu21 = nu12 * e22 / e11;

        Ok(Self { e11, e22, g12, nu12, nu21 })
    }

    /// Longitudinal modulus
    pub fn e11(&self) -> f64 {
        self.e11
    }

    /// Transverse modulus
    pub fn e22(&self) -> f64 {
        self.e22
    }

    /// In-plane shear modulus
    pub fn g12(&self) -> f64 {
        self.g12
    }

    /// Major Poisson's ratio
    pub fn nu12(&self) -> f64 {
        self.nu12
    }

    /// Minor Poisson's ratio, `nu12 E22 / E11`
    pub fn nu21(&self) -> f64 {
        self.nu21
    }

    /// Young's modulus at angle `theta` (radians) to the fiber direction
    pub fn directional_modulus(&self, theta: f64) -> f64 {
        let (s, c) = theta.sin_cos();
        let (s2, c2) = (s * s, c * c);
        let inverse =
            c2 * c2 / self.e11 + s2 * s2 / self.e22 + (1.0 / self.g12 - 2.0 * self.nu12 / self.e11) * s2 * c2;
        1.0 / inverse
    }

    /// Plane-stress lamina stiffness `Q` with engineering shear strain
    pub fn lamina_stiffness(&self) -> Mat3 {
        let denom = 1.0 - self.nu12 * self.nu21;
        let q11 = self.e11 / denom;
        let q22 = self.e22 / denom;
        let q12 = self.nu21 * q11;
        Mat3::new(q11, q12, 0.0, q12, q22, 0.0, 0.0, 0.0, self.g12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn lamina(packing: FiberPacking) -> HalpinTsai {
        let glass = Isotropy::new(70e9, 0.2).unwrap();
        let epoxy = Isotropy::new(3e9, 0.35).unwrap();
        HalpinTsai::new(&glass, &epoxy, 50.0, 0.2, packing).unwrap()
    }

    #[test]
    fn test_glass_epoxy_constants() {
        let ht = lamina(FiberPacking::Hexagonal);
        assert_relative_eq!(ht.e11(), 14.508319e9, max_relative = 1e-6);
        assert_relative_eq!(ht.e22(), 4.926518e9, max_relative = 1e-6);
        assert_relative_eq!(ht.g12(), 1.869369e9, max_relative = 1e-6);
        assert_relative_eq!(ht.nu12(), 0.32, epsilon = 1e-12);
        assert_relative_eq!(ht.nu21(), 0.32 * ht.e22() / ht.e11(), max_relative = 1e-12);

        let square = lamina(FiberPacking::Square);
        assert_relative_eq!(square.e11(), 14.555863e9, max_relative = 1e-6);
        assert_eq!(square.e22(), ht.e22());
    }

    #[test]
    fn test_directional_modulus_limits() {
        let ht = lamina(FiberPacking::default());
        assert_relative_eq!(ht.directional_modulus(0.0), ht.e11(), max_relative = 1e-12);
        assert_relative_eq!(ht.directional_modulus(FRAC_PI_2), ht.e22(), max_relative = 1e-12);
        assert_relative_eq!(ht.directional_modulus(FRAC_PI_4), 5.244277e9, max_relative = 1e-6);
        assert_relative_eq!(
            ht.directional_modulus(0.3),
            ht.directional_modulus(-0.3),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_fraction_is_matrix() {
        let glass = Isotropy::new(70e9, 0.2).unwrap();
        let epoxy = Isotropy::new(3e9, 0.35).unwrap();
        let ht = HalpinTsai::new(&glass, &epoxy, 20.0, 0.0, FiberPacking::Square).unwrap();
        assert_relative_eq!(ht.e11(), 3e9, max_relative = 1e-12);
        assert_relative_eq!(ht.e22(), 3e9, max_relative = 1e-12);
        assert_relative_eq!(ht.g12(), epoxy.shear_modulus(), max_relative = 1e-12);
    }

    #[test]
    fn test_lamina_stiffness_inverts_to_compliance() {
        let ht = lamina(FiberPacking::Hexagonal);
        let s = ht.lamina_stiffness().try_inverse().unwrap();
        assert_relative_eq!(s[(0, 0)], 1.0 / ht.e11(), max_relative = 1e-10);
        assert_relative_eq!(s[(1, 1)], 1.0 / ht.e22(), max_relative = 1e-10);
        assert_relative_eq!(s[(0, 1)], -ht.nu12() / ht.e11(), max_relative = 1e-10);
        assert_relative_eq!(s[(2, 2)], 1.0 / ht.g12(), max_relative = 1e-10);
    }

    #[test]
    fn test_transversely_isotropic_fiber() {
        let carbon = Material::transversely_isotropic(242e9, 15e9, 0.28, 0.4, 25e9).unwrap();
        let epoxy = Isotropy::new(3e9, 0.35).unwrap();
        let ht = HalpinTsai::from_material(&carbon, &epoxy, 50.0, 0.2, FiberPacking::Hexagonal).unwrap();
        assert_relative_eq!(ht.e11(), 38.648746e9, max_relative = 1e-6);
        // eta = 4/7, 3 GPa (1 + 8/35) / (1 - 4/35)
        assert_relative_eq!(ht.e22(), 3e9 * 43.0 / 31.0, max_relative = 1e-12);
        // eta = 43/47 against G_m = 3 GPa / 2.7
        assert_relative_eq!(ht.g12(), 3e9 / 2.7 * 107.0 / 64.0, max_relative = 1e-12);
        assert_relative_eq!(ht.nu12(), 0.336, epsilon = 1e-12);
    }

    #[test]
    fn test_isotropic_material_matches_new() {
        let glass = Isotropy::new(70e9, 0.2).unwrap();
        let epoxy = Isotropy::new(3e9, 0.35).unwrap();
        let from_material =
            HalpinTsai::from_material(&Material::from(glass), &epoxy, 50.0, 0.2, FiberPacking::Hexagonal).unwrap();
        assert_eq!(from_material, lamina(FiberPacking::Hexagonal));
    }

    #[test]
    fn test_deserialized_constants_are_checked() {
        let epoxy = Isotropy::new(3e9, 0.35).unwrap();
        let fiber: Material = serde_json::from_str(
            r#"{"TransverselyIsotropic": {"e_l": 242e9, "e_t": 15e9, "nu_lt": 0.28, "nu_tt": 0.4, "g_lt": -25e9}}"#,
        )
        .unwrap();
        assert!(matches!(
            HalpinTsai::from_material(&fiber, &epoxy, 50.0, 0.2, FiberPacking::Hexagonal),
            Err(HomogenizationError::InvalidMaterial(_))
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        let glass = Isotropy::new(70e9, 0.2).unwrap();
        let epoxy = Isotropy::new(3e9, 0.35).unwrap();
        assert!(matches!(
            HalpinTsai::new(&glass, &epoxy, 0.0, 0.2, FiberPacking::Hexagonal),
            Err(HomogenizationError::InvalidGeometry(_))
        ));
        assert!(matches!(
            HalpinTsai::new(&glass, &epoxy, 10.0, 1.2, FiberPacking::Hexagonal),
            Err(HomogenizationError::InvalidFraction(_))
        ));
    }
}
