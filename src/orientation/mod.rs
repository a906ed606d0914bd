//! Fiber orientation tensors, closures and orientation averaging

mod averaging;
mod closure;
mod tensor2;

use serde::{Deserialize, Serialize};

use crate::error::HomogenizationResult;
use crate::math::{Mat3, Tensor4};

pub use averaging::{
    average_with_closure, orientation_average, orientation_average_mandel,
    transverse_isotropy_residual,
};
pub use closure::{ClosureKind, HybridClosure, LinearClosure, OrientationClosure, QuadraticClosure};
pub use tensor2::OrientationTensor2;

/// Orientation state of a fiber phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    /// All fibers aligned with the x1 axis; no averaging is performed
    Aligned,
    /// Second-order tensor only; the fourth-order tensor comes from a closure
    SecondOrder(OrientationTensor2),
    /// Both tensors supplied directly
    FourthOrder {
        a2: OrientationTensor2,
        a4: Tensor4,
    },
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Aligned
    }
}

impl Orientation {
    /// Build a fourth-order orientation, deriving the second-order tensor as `a4_ijkk`
    pub fn from_fourth_order(a4: Tensor4, tolerance: f64) -> HomogenizationResult<Self> {
        let a2 = OrientationTensor2::new(a4.trace_last_pair(), tolerance)?;
        Ok(Self::FourthOrder { a2, a4 })
    }

    /// Whether this orientation skips averaging
    pub fn is_aligned(&self) -> bool {
        matches!(self, Self::Aligned)
    }

    /// Resolve to the `(a2, a4)` pair used for averaging
    ///
    /// Returns `None` for aligned fibers.
    pub fn resolve(&self, closure: &dyn OrientationClosure) -> Option<(Mat3, Tensor4)> {
        match self {
            Self::Aligned => None,
            Self::SecondOrder(a2) => Some((*a2.matrix(), closure.close(a2))),
            Self::FourthOrder { a2, a4 } => Some((*a2.matrix(), a4.clone())),
        }
    }
}

impl From<OrientationTensor2> for Orientation {
    fn from(a2: OrientationTensor2) -> Self {
        Self::SecondOrder(a2)
    }
}
