//! Fiber phase description

use serde::{Deserialize, Serialize};

use crate::eshelby::AspectRatioRegime;
use crate::error::{HomogenizationError, HomogenizationResult};
use crate::materials::Material;
use crate::options::HomogenizationOptions;
use crate::orientation::{Orientation, OrientationTensor2};

/// One population of inclusions embedded in the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberPhase {
    /// Constituent material, in the fiber frame (fiber axis along x1)
    pub material: Material,
    /// Length over diameter of the spheroidal inclusion
    pub aspect_ratio: f64,
    /// Volume fraction of this phase in the composite
    pub volume_fraction: f64,
    /// Orientation state of the phase
    pub orientation: Orientation,
}

impl FiberPhase {
    /// Create an aligned phase (fibers along x1)
    pub fn new(material: impl Into<Material>, aspect_ratio: f64, volume_fraction: f64) -> Self {
        Self {
            material: material.into(),
            aspect_ratio,
            volume_fraction,
            orientation: Orientation::Aligned,
        }
    }

    /// Set the orientation state
    pub fn with_orientation(mut self, orientation: impl Into<Orientation>) -> Self {
        self.orientation = orientation.into();
        self
    }

    /// Check material, volume fraction, orientation and geometry
    ///
    /// Material constants and orientation tensors are checked again here
    /// because deserialized phases bypass their constructors.
    pub fn validate(&self, options: &HomogenizationOptions) -> HomogenizationResult<AspectRatioRegime> {
        self.material.validate()?;
        if !(self.volume_fraction.is_finite() && (0.0..=1.0).contains(&self.volume_fraction)) {
            return Err(HomogenizationError::InvalidFraction(format!(
                "phase volume fraction must lie in [0, 1], got {}",
                self.volume_fraction
            )));
        }
        match &self.orientation {
            Orientation::Aligned => {}
            Orientation::SecondOrder(a2) | Orientation::FourthOrder { a2, .. } => {
                OrientationTensor2::new(*a2.matrix(), options.orientation_tolerance)?;
            }
        }
        AspectRatioRegime::classify(self.aspect_ratio, options.sphere_tolerance)
    }
}
