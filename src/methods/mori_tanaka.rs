//! Multi-phase Mori-Tanaka homogenization
//!
//! Every phase contributes its dilute strain concentration tensor
//! `A_r = [I + S_r C_m^-1 (C_r - C_m)]^-1` and the polarization
//! `P_r = (C_r - C_m) A_r`, both orientation-averaged. All phases are then mixed
//! in a single solve:
//!
//! ```text
//! C_eff = C_m + (sum f_r <P_r>) [f_m I + sum f_r <A_r>]^-1
//! ```

use log::{debug, warn};

use crate::error::{HomogenizationError, HomogenizationResult};
use crate::eshelby::EshelbyTensor;
use crate::materials::{Isotropy, Material};
use crate::math::{self, Mat6};
use crate::options::HomogenizationOptions;
use crate::orientation::{orientation_average_mandel, transverse_isotropy_residual, Orientation};
use crate::phase::FiberPhase;
use crate::results::{EffectiveStiffness, PhaseConcentration};

/// Mori-Tanaka homogenization of an isotropic matrix with fiber phases
///
/// All inputs are validated before anything is computed. The solution is built
/// once on construction and read through the accessors.
#[derive(Debug, Clone)]
pub struct MoriTanaka {
    matrix: Isotropy,
    matrix_fraction: f64,
    options: HomogenizationOptions,
    eshelby: Vec<EshelbyTensor>,
    concentrations: Vec<PhaseConcentration>,
    effective: EffectiveStiffness,
}

impl MoriTanaka {
    /// Homogenize with the matrix fraction implied as `1 - sum f_r`
    pub fn new(
        matrix: impl Into<Material>,
        phases: &[FiberPhase],
        options: HomogenizationOptions,
    ) -> HomogenizationResult<Self> {
        Self::build(matrix.into(), phases, None, options)
    }

    /// Homogenize with an explicit matrix fraction
    ///
    /// The matrix fraction and the phase fractions must sum to 1 within
    /// `options.fraction_tolerance`.
    pub fn with_matrix_fraction(
        matrix: impl Into<Material>,
        phases: &[FiberPhase],
        matrix_fraction: f64,
        options: HomogenizationOptions,
    ) -> HomogenizationResult<Self> {
        Self::build(matrix.into(), phases, Some(matrix_fraction), options)
    }

    fn build(
        matrix: Material,
        phases: &[FiberPhase],
        matrix_fraction: Option<f64>,
        options: HomogenizationOptions,
    ) -> HomogenizationResult<Self> {
        let matrix = *matrix.as_isotropy().ok_or_else(|| {
            HomogenizationError::InvalidMaterial("matrix material must be isotropic".to_string())
        })?;
        matrix.validate()?;
        let matrix_fraction = validate_fractions(phases, matrix_fraction, options.fraction_tolerance)?;

        // Materials, geometry and phase stiffness are checked for every phase before any solve
        let mut eshelby = Vec::with_capacity(phases.len());
        let mut stiffnesses = Vec::with_capacity(phases.len());
        for phase in phases {
            phase.validate(&options)?;
            eshelby.push(EshelbyTensor::with_tolerance(
                matrix.poisson_ratio(),
                phase.aspect_ratio,
                options.sphere_tolerance,
            )?);
            stiffnesses.push(phase.material.stiffness()?);
        }

        let c_m = matrix.stiffness();
        let s_m = matrix.compliance();
        let identity = math::identity();

        let mut polarization_sum = Mat6::zeros();
        let mut concentration_sum = matrix_fraction * identity;
        let mut concentrations = Vec::with_capacity(phases.len());

        for (index, ((phase, s), c_r)) in phases.iter().zip(&eshelby).zip(&stiffnesses).enumerate() {
            let jump = c_r - c_m;
            let dilute = math::try_inverse_lu(&(identity + s.mandel() * s_m * jump)).ok_or_else(|| {
                HomogenizationError::SingularSystem(format!(
                    "dilute concentration tensor of phase {index} is singular"
                ))
            })?;
            let polarization = jump * dilute;

            let (averaged, averaged_polarization) = match phase.orientation.resolve(&options.closure) {
                None => (dilute, polarization),
                Some((a2, a4)) => (
                    orientation_average_mandel(&dilute, &a2, &a4),
                    orientation_average_mandel(&polarization, &a2, &a4),
                ),
            };

            if options.log {
                debug!(
                    "phase {index}: {:?}, a = {}, f = {}, aligned = {}",
                    s.regime(),
                    phase.aspect_ratio,
                    phase.volume_fraction,
                    phase.orientation.is_aligned()
                );
            }

            polarization_sum += phase.volume_fraction * averaged_polarization;
            concentration_sum += phase.volume_fraction * averaged;
            concentrations.push(PhaseConcentration {
                regime: s.regime(),
                dilute,
                averaged,
                averaged_polarization,
            });
        }

        let correction = math::solve_right_lu(&polarization_sum, &concentration_sum).ok_or_else(|| {
            HomogenizationError::SingularSystem("Mori-Tanaka mixing system is singular".to_string())
        })?;
        let effective = EffectiveStiffness::from_mandel(c_m + correction);

        let report = effective.symmetry_report();
        if !report.has_major_symmetry(options.symmetry_tolerance) {
            warn!(
                "effective stiffness is not major-symmetric (relative residual {:.3e})",
                report.major
            );
        }

        Ok(Self {
            matrix,
            matrix_fraction,
            options,
            eshelby,
            concentrations,
            effective,
        })
    }

    /// Effective stiffness of the composite
    pub fn effective_stiffness(&self) -> &EffectiveStiffness {
        &self.effective
    }

    /// Concentration tensors, one entry per phase in input order
    pub fn phase_concentrations(&self) -> &[PhaseConcentration] {
        &self.concentrations
    }

    /// Eshelby tensors, one entry per phase in input order
    pub fn eshelby_tensors(&self) -> &[EshelbyTensor] {
        &self.eshelby
    }

    /// Matrix volume fraction used in the mixing
    pub fn matrix_fraction(&self) -> f64 {
        self.matrix_fraction
    }

    /// Matrix material
    pub fn matrix(&self) -> &Isotropy {
        &self.matrix
    }

    /// Orientation average of the effective stiffness
    ///
    /// Averages a unidirectional result over a fiber distribution. The effective
    /// stiffness must be transversely isotropic about x1, which holds when every
    /// phase is aligned.
    pub fn average_stiffness(&self, orientation: &Orientation) -> HomogenizationResult<EffectiveStiffness> {
        let Some((a2, a4)) = orientation.resolve(&self.options.closure) else {
            return Ok(self.effective);
        };
        let residual = transverse_isotropy_residual(&self.effective.tensor());
        if residual > self.options.symmetry_tolerance {
            return Err(HomogenizationError::InvalidInput(format!(
                "effective stiffness is not transversely isotropic about x1 (residual {residual:.3e})"
            )));
        }
        Ok(EffectiveStiffness::from_mandel(orientation_average_mandel(
            self.effective.mandel(),
            &a2,
            &a4,
        )))
    }
}

/// Check phase fractions and return the matrix fraction
fn validate_fractions(
    phases: &[FiberPhase],
    matrix_fraction: Option<f64>,
    tolerance: f64,
) -> HomogenizationResult<f64> {
    if phases.is_empty() {
        return Err(HomogenizationError::InvalidInput(
            "at least one fiber phase is required".to_string(),
        ));
    }
    for (index, phase) in phases.iter().enumerate() {
        let f = phase.volume_fraction;
        if !(f.is_finite() && (0.0..=1.0).contains(&f)) {
            return Err(HomogenizationError::InvalidFraction(format!(
                "volume fraction of phase {index} must lie in [0, 1], got {f}"
            )));
        }
    }

    let fiber_total: f64 = phases.iter().map(|p| p.volume_fraction).sum();
    match matrix_fraction {
        Some(f_m) => {
            if !(f_m.is_finite() && (0.0..=1.0).contains(&f_m)) {
                return Err(HomogenizationError::InvalidFraction(format!(
                    "matrix fraction must lie in [0, 1], got {f_m}"
                )));
            }
            if (f_m + fiber_total - 1.0).abs() > tolerance {
                return Err(HomogenizationError::InvalidFraction(format!(
                    "volume fractions sum to {}, expected 1",
                    f_m + fiber_total
                )));
            }
            Ok(f_m)
        }
        None => {
            let f_m = 1.0 - fiber_total;
            if f_m < -tolerance {
                return Err(HomogenizationError::InvalidFraction(format!(
                    "fiber volume fractions sum to {fiber_total}, exceeding 1"
                )));
            }
            Ok(f_m.max(0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Tensor4, Vec3};
    use crate::orientation::{ClosureKind, OrientationTensor2};
    use approx::assert_relative_eq;

    fn epoxy() -> Isotropy {
        Isotropy::new(3e9, 0.35).unwrap()
    }

    fn glass() -> Isotropy {
        Isotropy::new(70e9, 0.2).unwrap()
    }

    #[test]
    fn test_aligned_glass_epoxy() {
        let phases = [FiberPhase::new(glass(), 50.0, 0.2)];
        let mt = MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()).unwrap();
        let c = mt.effective_stiffness();
        assert_relative_eq!(c.youngs_modulus(&Vec3::x()).unwrap(), 15.627066e9, max_relative = 1e-4);
        assert_relative_eq!(c.youngs_modulus(&Vec3::y()).unwrap(), 4.497291e9, max_relative = 1e-4);
        assert_relative_eq!(mt.matrix_fraction(), 0.8, epsilon = 1e-15);
        assert!(c.symmetry_report().is_symmetric(1e-10));
    }

    #[test]
    fn test_identical_phase_returns_matrix() {
        let phases = [FiberPhase::new(epoxy(), 20.0, 0.4)];
        let mt = MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()).unwrap();
        assert_eq!(*mt.effective_stiffness().mandel(), epoxy().stiffness());
    }

    #[test]
    fn test_zero_fraction_returns_matrix() {
        let phases = [
            FiberPhase::new(glass(), 10.0, 0.0),
            FiberPhase::new(glass(), 0.2, 0.0).with_orientation(OrientationTensor2::isotropic()),
        ];
        let mt = MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()).unwrap();
        assert_eq!(*mt.effective_stiffness().mandel(), epoxy().stiffness());
        assert_eq!(mt.matrix_fraction(), 1.0);
    }

    #[test]
    fn test_full_fraction_returns_fiber() {
        let phases = [FiberPhase::new(glass(), 50.0, 1.0)];
        let mt = MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()).unwrap();
        assert_eq!(mt.matrix_fraction(), 0.0);
        assert!(math::relative_difference(&glass().stiffness(), mt.effective_stiffness().mandel()) < 1e-9);
    }

    #[test]
    fn test_validation_errors() {
        let opts = HomogenizationOptions::default();

        let err = MoriTanaka::new(epoxy(), &[], opts.clone()).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidInput(_)));

        let phases = [FiberPhase::new(glass(), 10.0, 0.6), FiberPhase::new(glass(), 10.0, 0.6)];
        let err = MoriTanaka::new(epoxy(), &phases, opts.clone()).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidFraction(_)));

        let phases = [FiberPhase::new(glass(), 10.0, 0.3)];
        let err = MoriTanaka::with_matrix_fraction(epoxy(), &phases, 0.6, opts.clone()).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidFraction(_)));
        assert!(MoriTanaka::with_matrix_fraction(epoxy(), &phases, 0.7, opts.clone()).is_ok());

        let phases = [FiberPhase::new(glass(), -1.0, 0.3)];
        let err = MoriTanaka::new(epoxy(), &phases, opts.clone()).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidGeometry(_)));

        let carbon = Material::transversely_isotropic(242e9, 15e9, 0.28, 0.4, 25e9).unwrap();
        let phases = [FiberPhase::new(glass(), 10.0, 0.3)];
        let err = MoriTanaka::new(carbon, &phases, opts).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidMaterial(_)));
    }

    #[test]
    fn test_deserialized_materials_are_checked() {
        let opts = HomogenizationOptions::default();

        let matrix: Isotropy = serde_json::from_str(r#"{"e": -3e9, "nu": 0.35}"#).unwrap();
        let phases = [FiberPhase::new(glass(), 50.0, 0.2)];
        let err = MoriTanaka::new(matrix, &phases, opts.clone()).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidMaterial(_)));

        let fiber: Isotropy = serde_json::from_str(r#"{"e": 70e9, "nu": 0.5}"#).unwrap();
        let phases = [FiberPhase::new(fiber, 50.0, 0.2)];
        let err = MoriTanaka::new(epoxy(), &phases, opts).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidMaterial(_)));
    }

    #[test]
    fn test_singular_mixing_system() {
        let orientation = Orientation::FourthOrder {
            a2: OrientationTensor2::isotropic(),
            a4: Tensor4::from_fn(|_, _, _, _| f64::INFINITY),
        };
        let phases = [FiberPhase::new(glass(), 20.0, 1.0).with_orientation(orientation)];
        match MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()) {
            Err(HomogenizationError::SingularSystem(msg)) => assert!(msg.contains("mixing"), "{msg}"),
            other => panic!("expected a singular mixing system, got {other:?}"),
        }
    }

    #[test]
    fn test_per_phase_outputs() {
        let phases = [
            FiberPhase::new(glass(), 1.0, 0.1),
            FiberPhase::new(glass(), 0.1, 0.1).with_orientation(OrientationTensor2::isotropic()),
        ];
        let mt = MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()).unwrap();
        assert_eq!(mt.eshelby_tensors().len(), 2);
        assert_eq!(mt.phase_concentrations().len(), 2);
        let sphere = &mt.phase_concentrations()[0];
        assert_eq!(sphere.dilute, sphere.averaged);
        assert!(sphere.symmetry_report().is_symmetric(1e-10));
    }

    #[test]
    fn test_average_stiffness_rotates_aligned_result() {
        let phases = [FiberPhase::new(glass(), 50.0, 0.2)];
        let opts = HomogenizationOptions::default().with_closure(ClosureKind::Quadratic);
        let mt = MoriTanaka::new(epoxy(), &phases, opts).unwrap();
        let e1 = mt.effective_stiffness().youngs_modulus(&Vec3::x()).unwrap();

        let along_y = Orientation::from(OrientationTensor2::aligned(&Vec3::y()).unwrap());
        let rotated = mt.average_stiffness(&along_y).unwrap();
        assert_relative_eq!(rotated.youngs_modulus(&Vec3::y()).unwrap(), e1, max_relative = 1e-10);

        let same = mt.average_stiffness(&Orientation::Aligned).unwrap();
        assert_eq!(same, *mt.effective_stiffness());
    }

    #[test]
    fn test_average_stiffness_requires_transverse_isotropy() {
        let phases = [FiberPhase::new(glass(), 50.0, 0.2)
            .with_orientation(OrientationTensor2::from_diagonal(0.6, 0.3, 0.1).unwrap())];
        let mt = MoriTanaka::new(epoxy(), &phases, HomogenizationOptions::default()).unwrap();
        let err = mt.average_stiffness(&Orientation::from(OrientationTensor2::isotropic())).unwrap_err();
        assert!(matches!(err, HomogenizationError::InvalidInput(_)));
    }
}
