//! Eshelby tensor for spheroidal inclusions
//!
//! Closed-form components after Tandon and Weng (1984) for a spheroid whose
//! symmetry axis is x1 and whose aspect ratio is `a = length / diameter`.
//! Prolate (`a > 1`) and oblate (`a < 1`) shapes share the component formulas
//! and differ only in the shape function `g`. Both contain `1 / (a^2 - 1)`
//! terms that cancel as `a -> 1`, so a band around the sphere is evaluated
//! with the isotropic closed form instead.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::math::{tensor_to_mandel, Mat6, Tensor4};

/// Default half-width of the spherical band around `a = 1`
pub const DEFAULT_SPHERE_TOLERANCE: f64 = 1e-4;

/// Shape regime of a spheroidal inclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatioRegime {
    /// `|a - 1| < tolerance`
    Spherical,
    /// Elongated along the symmetry axis (fibers)
    Prolate,
    /// Flattened along the symmetry axis (platelets)
    Oblate,
}

impl AspectRatioRegime {
    /// Classify an aspect ratio
    ///
    /// Fails with `InvalidGeometry` unless `aspect_ratio` is finite and positive.
    pub fn classify(aspect_ratio: f64, sphere_tolerance: f64) -> HomogenizationResult<Self> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(HomogenizationError::InvalidGeometry(format!(
                "aspect ratio must be positive and finite, got {aspect_ratio}"
            )));
        }
        let regime = if (aspect_ratio - 1.0).abs() < sphere_tolerance {
            Self::Spherical
        } else if aspect_ratio > 1.0 {
            Self::Prolate
        } else {
            Self::Oblate
        };
        Ok(regime)
    }
}

/// Independent components of the Eshelby tensor of a spheroid
#[derive(Debug, Clone, Copy)]
struct Components {
    s1111: f64,
    s2222: f64,
    s2233: f64,
    s2211: f64,
    s1122: f64,
    s2323: f64,
    s1212: f64,
}

impl Components {
    fn spherical(nu: f64) -> Self {
        let d = 15.0 * (1.0 - nu);
        let normal = (7.0 - 5.0 * nu) / d;
        let coupling = (5.0 * nu - 1.0) / d;
        let shear = (4.0 - 5.0 * nu) / d;
        Self {
            s1111: normal,
            s2222: normal,
            s2233: coupling,
            s2211: coupling,
            s1122: coupling,
            s2323: shear,
            s1212: shear,
        }
    }

    fn spheroidal(nu: f64, a: f64, g: f64) -> Self {
        // a^2 / (a^2 - 1) and 1 / (a^2 - 1), kept finite for very long fibers
        let (ratio, inv_m) = if a > 1.0 {
            let eps = (a * a).recip();
            (1.0 / (1.0 - eps), eps / (1.0 - eps))
        } else {
            let m = a * a - 1.0;
            (a * a / m, 1.0 / m)
        };
        let q = 1.0 - nu;
        let r = 1.0 - 2.0 * nu;

        Self {
            s1111: 1.0 / (2.0 * q) * (r + 3.0 * ratio - inv_m - (r + 3.0 * ratio) * g),
            s2222: 3.0 / (8.0 * q) * ratio + 1.0 / (4.0 * q) * (r - 9.0 / 4.0 * inv_m) * g,
            s2233: 1.0 / (4.0 * q) * (ratio / 2.0 - (r + 3.0 / 4.0 * inv_m) * g),
            s2211: -1.0 / (2.0 * q) * ratio + 1.0 / (4.0 * q) * (3.0 * ratio - r) * g,
            s1122: -1.0 / (2.0 * q) * (r + inv_m) + 1.0 / (2.0 * q) * (r + 3.0 / 2.0 * inv_m) * g,
            s2323: 1.0 / (4.0 * q) * (ratio / 2.0 + (r - 3.0 / 4.0 * inv_m) * g),
            s1212: 1.0 / (4.0 * q) * (r - ratio - inv_m - 0.5 * (r - 3.0 * (ratio + inv_m)) * g),
        }
    }

    fn to_tensor(self) -> Tensor4 {
        let mut s = [[[[0.0; 3]; 3]; 3]; 3];
        let mut set = |i: usize, j: usize, k: usize, l: usize, v: f64| {
            for (p, q) in [(i, j), (j, i)] {
                for (r, t) in [(k, l), (l, k)] {
                    s[p][q][r][t] = v;
                }
            }
        };

        set(0, 0, 0, 0, self.s1111);
        set(1, 1, 1, 1, self.s2222);
        set(2, 2, 2, 2, self.s2222);
        set(1, 1, 2, 2, self.s2233);
        set(2, 2, 1, 1, self.s2233);
        set(1, 1, 0, 0, self.s2211);
        set(2, 2, 0, 0, self.s2211);
        set(0, 0, 1, 1, self.s1122);
        set(0, 0, 2, 2, self.s1122);
        set(1, 2, 1, 2, self.s2323);
        set(0, 1, 0, 1, self.s1212);
        set(0, 2, 0, 2, self.s1212);
        Tensor4::from_components(&s)
    }
}

/// Shape function for a prolate spheroid
///
/// Written in `1 / a^2` so that it tends to 1 without overflow as `a` grows.
fn prolate_g(a: f64) -> f64 {
    let eps = (a * a).recip();
    let q = 1.0 - eps;
    // acosh(a) = ln(2a) to double precision here, and a.acosh() overflows near f64::MAX
    let acosh = if a < 1e8 { a.acosh() } else { LN_2 + a.ln() };
    (1.0 - acosh / a / a / q.sqrt()) / q
}

/// Shape function for an oblate spheroid
fn oblate_g(a: f64) -> f64 {
    let m = 1.0 - a * a;
    a / m.powf(1.5) * (a.acos() - a * m.sqrt())
}

/// Eshelby tensor of a spheroidal inclusion in an isotropic matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EshelbyTensor {
    regime: AspectRatioRegime,
    aspect_ratio: f64,
    poisson_ratio: f64,
    tensor: Tensor4,
}

impl EshelbyTensor {
    /// Compute the Eshelby tensor with the default spherical band
    ///
    /// # Arguments
    /// * `poisson_ratio` - Poisson's ratio of the matrix, `-1 < nu < 0.5`
    /// * `aspect_ratio` - Length over diameter of the inclusion, `a > 0`
    pub fn new(poisson_ratio: f64, aspect_ratio: f64) -> HomogenizationResult<Self> {
        Self::with_tolerance(poisson_ratio, aspect_ratio, DEFAULT_SPHERE_TOLERANCE)
    }

    /// Compute the Eshelby tensor with a custom spherical band half-width
    pub fn with_tolerance(
        poisson_ratio: f64,
        aspect_ratio: f64,
        sphere_tolerance: f64,
    ) -> HomogenizationResult<Self> {
        if !(poisson_ratio > -1.0 && poisson_ratio < 0.5) {
            return Err(HomogenizationError::InvalidGeometry(format!(
                "matrix Poisson's ratio must lie in (-1, 0.5), got {poisson_ratio}"
            )));
        }
        let regime = AspectRatioRegime::classify(aspect_ratio, sphere_tolerance)?;

        let components = match regime {
            AspectRatioRegime::Spherical => Components::spherical(poisson_ratio),
            AspectRatioRegime::Prolate => {
                Components::spheroidal(poisson_ratio, aspect_ratio, prolate_g(aspect_ratio))
            }
            AspectRatioRegime::Oblate => {
                Components::spheroidal(poisson_ratio, aspect_ratio, oblate_g(aspect_ratio))
            }
        };

        Ok(Self {
            regime,
            aspect_ratio,
            poisson_ratio,
            tensor: components.to_tensor(),
        })
    }

    /// Branch that produced this tensor
    pub fn regime(&self) -> AspectRatioRegime {
        self.regime
    }

    /// Inclusion aspect ratio
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Matrix Poisson's ratio
    pub fn poisson_ratio(&self) -> f64 {
        self.poisson_ratio
    }

    /// Full fourth-order tensor
    pub fn tensor(&self) -> &Tensor4 {
        &self.tensor
    }

    /// Mandel representation
    pub fn mandel(&self) -> Mat6 {
        tensor_to_mandel(&self.tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regime_classification() {
        let tol = DEFAULT_SPHERE_TOLERANCE;
        assert_eq!(AspectRatioRegime::classify(1.0, tol).unwrap(), AspectRatioRegime::Spherical);
        assert_eq!(AspectRatioRegime::classify(1.00005, tol).unwrap(), AspectRatioRegime::Spherical);
        assert_eq!(AspectRatioRegime::classify(50.0, tol).unwrap(), AspectRatioRegime::Prolate);
        assert_eq!(AspectRatioRegime::classify(0.1, tol).unwrap(), AspectRatioRegime::Oblate);
    }

    #[test]
    fn test_invalid_geometry() {
        for a in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let err = EshelbyTensor::new(0.3, a).unwrap_err();
            assert!(matches!(err, HomogenizationError::InvalidGeometry(_)));
        }
        assert!(matches!(
            EshelbyTensor::new(0.5, 10.0).unwrap_err(),
            HomogenizationError::InvalidGeometry(_)
        ));
    }

    #[test]
    fn test_sphere_values() {
        let nu = 0.35;
        let s = EshelbyTensor::new(nu, 1.0).unwrap();
        let t = s.tensor();
        assert_relative_eq!(t.get(0, 0, 0, 0), (7.0 - 5.0 * nu) / (15.0 * (1.0 - nu)), epsilon = 1e-14);
        assert_relative_eq!(t.get(0, 0, 1, 1), (5.0 * nu - 1.0) / (15.0 * (1.0 - nu)), epsilon = 1e-14);
        assert_relative_eq!(t.get(1, 2, 2, 1), (4.0 - 5.0 * nu) / (15.0 * (1.0 - nu)), epsilon = 1e-14);
    }

    #[test]
    fn test_branches_converge_to_sphere() {
        for nu in [-0.5, 0.0, 0.2, 0.35, 0.49] {
            let sphere = EshelbyTensor::new(nu, 1.0).unwrap().mandel();
            for a in [1.001, 0.999] {
                let near = EshelbyTensor::new(nu, a).unwrap();
                assert_ne!(near.regime(), AspectRatioRegime::Spherical);
                assert!((near.mandel() - sphere).amax() < 2e-3, "nu = {nu}, a = {a}");
            }
        }
    }

    #[test]
    fn test_long_fiber_limit() {
        let nu = 0.3;
        let t = EshelbyTensor::new(nu, 1e5).unwrap().tensor().clone();
        assert_relative_eq!(t.get(0, 0, 0, 0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(t.get(1, 1, 1, 1), (5.0 - 4.0 * nu) / (8.0 * (1.0 - nu)), epsilon = 1e-6);
        assert_relative_eq!(t.get(1, 1, 2, 2), (4.0 * nu - 1.0) / (8.0 * (1.0 - nu)), epsilon = 1e-6);
        assert_relative_eq!(t.get(1, 1, 0, 0), nu / (2.0 * (1.0 - nu)), epsilon = 1e-6);
        assert_relative_eq!(t.get(0, 1, 0, 1), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_penny_limit() {
        let nu = 0.3;
        let t = EshelbyTensor::new(nu, 1e-7).unwrap().tensor().clone();
        assert_relative_eq!(t.get(0, 0, 0, 0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(t.get(0, 0, 1, 1), nu / (1.0 - nu), epsilon = 1e-5);
        assert_relative_eq!(t.get(0, 1, 0, 1), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_minor_symmetry() {
        let t = EshelbyTensor::new(0.25, 7.5).unwrap().tensor().clone();
        assert!(t.left_minor_transpose().norm_diff(&t) < 1e-14);
        assert!(t.right_minor_transpose().norm_diff(&t) < 1e-14);
    }

    #[test]
    fn test_extreme_aspect_ratio_stays_finite() {
        let nu = 0.3;
        let cylinder = EshelbyTensor::new(nu, 1e12).unwrap().mandel();
        for a in [1e160, 1e300, f64::MAX] {
            let m = EshelbyTensor::new(nu, a).unwrap().mandel();
            assert!(m.iter().all(|v| v.is_finite()), "a = {a}");
            assert!((m - cylinder).amax() < 1e-12, "a = {a}");
        }
    }
}
