//! Homogenization options and tolerances

use serde::{Deserialize, Serialize};

use crate::error::HomogenizationResult;
use crate::orientation::ClosureKind;

/// Options for homogenization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomogenizationOptions {
    /// Half-width of the band around aspect ratio 1 treated as a sphere
    pub sphere_tolerance: f64,
    /// Allowed deviation of the summed volume fractions from 1
    pub fraction_tolerance: f64,
    /// Tolerance for symmetry, trace and eigenvalue checks on orientation tensors
    pub orientation_tolerance: f64,
    /// Relative tolerance used when reporting the symmetry of results
    pub symmetry_tolerance: f64,
    /// Closure used when only a second-order orientation tensor is given
    pub closure: ClosureKind,
    /// Enable per-phase debug logging
    pub log: bool,
}

impl Default for HomogenizationOptions {
    fn default() -> Self {
        Self {
            sphere_tolerance: 1e-4,
            fraction_tolerance: 1e-8,
            orientation_tolerance: 1e-6,
            symmetry_tolerance: 1e-6,
            closure: ClosureKind::Hybrid,
            log: false,
        }
    }
}

impl HomogenizationOptions {
    /// Parse options from a JSON string; missing fields take their defaults
    pub fn from_json(json: &str) -> HomogenizationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the spherical band half-width
    pub fn with_sphere_tolerance(mut self, tol: f64) -> Self {
        self.sphere_tolerance = tol;
        self
    }

    /// Set the volume fraction tolerance
    pub fn with_fraction_tolerance(mut self, tol: f64) -> Self {
        self.fraction_tolerance = tol;
        self
    }

    /// Set the orientation tensor tolerance
    pub fn with_orientation_tolerance(mut self, tol: f64) -> Self {
        self.orientation_tolerance = tol;
        self
    }

    /// Set the symmetry reporting tolerance
    pub fn with_symmetry_tolerance(mut self, tol: f64) -> Self {
        self.symmetry_tolerance = tol;
        self
    }

    /// Select the orientation closure
    pub fn with_closure(mut self, closure: ClosureKind) -> Self {
        self.closure = closure;
        self
    }
}
