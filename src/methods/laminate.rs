//! Laminate averaging of plane-stress lamina stiffnesses

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::math::{Mat3, Vec3};

use super::HalpinTsai;

const FRACTION_TOLERANCE: f64 = 1e-8;

/// Single ply of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ply {
    /// Plane-stress stiffness in the ply frame
    pub stiffness: Mat3,
    /// Fiber angle to the laminate x axis in radians
    pub angle: f64,
    /// Share of the laminate thickness
    pub fraction: f64,
}

/// Thickness-weighted stack of rotated plies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laminate {
    plies: Vec<Ply>,
}

impl Laminate {
    /// Build a laminate from per-ply stiffnesses and angles
    ///
    /// Plies are weighted equally when `fractions` is `None`.
    pub fn new(stiffnesses: &[Mat3], angles: &[f64], fractions: Option<&[f64]>) -> HomogenizationResult<Self> {
        if stiffnesses.is_empty() {
            return Err(HomogenizationError::InvalidInput("laminate has no plies".to_string()));
        }
        if stiffnesses.len() != angles.len() {
            return Err(HomogenizationError::InvalidInput(format!(
                "{} stiffnesses but {} angles",
                stiffnesses.len(),
                angles.len()
            )));
        }

        let n = stiffnesses.len();
        let fractions = match fractions {
            Some(f) if f.len() != n => {
                return Err(HomogenizationError::InvalidInput(format!(
                    "{n} plies but {} volume fractions",
                    f.len()
                )))
            }
            Some(f) => f.to_vec(),
            None => vec![1.0 / n as f64; n],
        };

        if let Some(bad) = fractions.iter().find(|f| !(f.is_finite() && (0.0..=1.0).contains(*f))) {
            return Err(HomogenizationError::InvalidFraction(format!(
                "ply fraction must lie in [0, 1], got {bad}"
            )));
        }
        let total: f64 = fractions.iter().sum();
        if (total - 1.0).abs() > FRACTION_TOLERANCE {
            return Err(HomogenizationError::InvalidFraction(format!(
                "ply fractions sum to {total}, expected 1"
            )));
        }

        let plies = stiffnesses
            .iter()
            .zip(angles)
            .zip(fractions)
            .map(|((&stiffness, &angle), fraction)| Ply { stiffness, angle, fraction })
            .collect();
        Ok(Self { plies })
    }

    /// Discretize an in-plane fiber orientation density
    ///
    /// Samples `density` at `n_plies` uniformly spaced angles in `[-pi/2, pi/2)`
    /// and uses the normalized samples as ply fractions.
    pub fn from_distribution<F>(lamina: &Mat3, density: F, n_plies: usize) -> HomogenizationResult<Self>
    where
        F: Fn(f64) -> f64,
    {
        if n_plies == 0 {
            return Err(HomogenizationError::InvalidInput("laminate has no plies".to_string()));
        }
        let angles: Vec<f64> = (0..n_plies)
            .map(|i| -PI / 2.0 + PI * i as f64 / n_plies as f64)
            .collect();
        let weights: Vec<f64> = angles.iter().map(|&theta| density(theta)).collect();
        if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
            return Err(HomogenizationError::InvalidInput(
                "orientation density must be finite and non-negative".to_string(),
            ));
        }
        let mass: f64 = weights.iter().sum();
        if mass <= 0.0 {
            return Err(HomogenizationError::InvalidInput(
                "orientation density has no mass".to_string(),
            ));
        }

        let plies = angles
            .into_iter()
            .zip(weights)
            .map(|(angle, w)| Ply {
                stiffness: *lamina,
                angle,
                fraction: w / mass,
            })
            .collect();
        Ok(Self { plies })
    }

    /// Plies of the laminate
    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    /// Rotate a plane-stress stiffness by `angle` (radians)
    ///
    /// Uses the orthotropic entries `Q11, Q22, Q12, Q66` of the ply; coupling
    /// terms of the input are ignored.
    pub fn rotate_stiffness(stiffness: &Mat3, angle: f64) -> Mat3 {
        let (n, m) = angle.sin_cos();
        let (m2, n2) = (m * m, n * n);
        let (q11, q22, q12, q66) = (stiffness[(0, 0)], stiffness[(1, 1)], stiffness[(0, 1)], stiffness[(2, 2)]);

        let r11 = m2 * m2 * q11 + n2 * n2 * q22 + 2.0 * m2 * n2 * q12 + 4.0 * m2 * n2 * q66;
        let r22 = n2 * n2 * q11 + m2 * m2 * q22 + 2.0 * m2 * n2 * q12 + 4.0 * m2 * n2 * q66;
        let r12 = m2 * n2 * (q11 + q22 - 4.0 * q66) + (m2 * m2 + n2 * n2) * q12;
        let r66 = m2 * n2 * (q11 + q22 - 2.0 * q12) + (m2 - n2) * (m2 - n2) * q66;
        let r16 = m * n * (m2 * (q11 - q12 - 2.0 * q66) + n2 * (q12 - q22 + 2.0 * q66));
        let r26 = m * n * (n2 * (q11 - q12 - 2.0 * q66) + m2 * (q12 - q22 + 2.0 * q66));

        Mat3::new(r11, r12, r16, r12, r22, r26, r16, r26, r66)
    }

    /// Fraction-weighted average of the rotated ply stiffnesses
    pub fn effective_stiffness(&self) -> Mat3 {
        self.plies
            .iter()
            .fold(Mat3::zeros(), |acc, ply| acc + ply.fraction * Self::rotate_stiffness(&ply.stiffness, ply.angle))
    }

    /// In-plane Young's modulus of the averaged stiffness at `angle` (radians)
    pub fn effective_modulus(&self, angle: f64) -> HomogenizationResult<f64> {
        let compliance = self.effective_stiffness().try_inverse().ok_or_else(|| {
            HomogenizationError::SingularSystem("laminate stiffness is not invertible".to_string())
        })?;
        let (s, c) = angle.sin_cos();
        let d = Vec3::new(c * c, s * s, s * c);
        Ok(1.0 / d.dot(&(compliance * d)))
    }

    /// Fraction-weighted mean of the lamina's directional modulus
    pub fn directional_modulus_average(&self, lamina: &HalpinTsai, angle: f64) -> f64 {
        self.plies
            .iter()
            .map(|ply| ply.fraction * lamina.directional_modulus(angle - ply.angle))
            .sum()
    }
}
