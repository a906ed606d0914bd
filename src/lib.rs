//! Fiber Homogenization - effective elastic stiffness of fiber-reinforced composites
//!
//! This library computes homogenized stiffness from constituent properties and
//! fiber geometry and orientation statistics, supporting:
//! - Eshelby tensors for spherical, prolate and oblate spheroids
//! - Multi-phase Mori-Tanaka homogenization with orientation averaging
//! - Orientation tensors with pluggable fourth-order closures
//! - Halpin-Tsai lamina estimates with Cox shear-lag and laminate averaging
//!
//! Stiffness tensors are stored as 6x6 matrices in Mandel notation, where the
//! matrix product equals the tensor double contraction.
//!
//! With several non-isotropic phases or orientation states the Mori-Tanaka
//! result need not be major-symmetric. The source research domain explicitly
//! flags potential thermodynamic-consistency violations (asymmetric stiffness)
//! as a known, unresolved modeling limitation rather than an implementation
//! bug. Use [`results::EffectiveStiffness::symmetry_report`] to quantify it and
//! [`results::EffectiveStiffness::symmetrized`] to opt into a symmetric copy.
//!
//! ## Example
//! ```rust
//! use fiber_homogenization::prelude::*;
//!
//! let epoxy = Isotropy::new(3e9, 0.35).unwrap();
//! let glass = Isotropy::new(70e9, 0.2).unwrap();
//!
//! // Short glass fibers, aspect ratio 50, 20 % by volume, along x1
//! let phases = [FiberPhase::new(glass, 50.0, 0.2)];
//!
//! let mt = MoriTanaka::new(epoxy, &phases, HomogenizationOptions::default()).unwrap();
//! let e1 = mt.effective_stiffness().youngs_modulus(&Vec3::x()).unwrap();
//! assert!((e1 - 15.627e9).abs() < 0.01e9);
//!
//! // Same fibers, randomly oriented in 3D
//! let random = [FiberPhase::new(glass, 50.0, 0.2).with_orientation(OrientationTensor2::isotropic())];
//! let mt = MoriTanaka::new(epoxy, &random, HomogenizationOptions::default()).unwrap();
//! assert!(mt.effective_stiffness().symmetry_report().is_symmetric(1e-9));
//! ```

pub mod error;
pub mod eshelby;
pub mod materials;
pub mod math;
pub mod methods;
pub mod options;
pub mod orientation;
pub mod phase;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::error::{HomogenizationError, HomogenizationResult};
    pub use crate::eshelby::{AspectRatioRegime, EshelbyTensor};
    pub use crate::materials::{Isotropy, Material, TransverseIsotropy};
    pub use crate::math::{Mat3, Mat6, Tensor4, Vec3};
    pub use crate::methods::{FiberPacking, HalpinTsai, Laminate, MoriTanaka};
    pub use crate::options::HomogenizationOptions;
    pub use crate::orientation::{
        ClosureKind, HybridClosure, LinearClosure, Orientation, OrientationClosure,
        OrientationTensor2, QuadraticClosure,
    };
    pub use crate::phase::FiberPhase;
    pub use crate::results::{EffectiveStiffness, PhaseConcentration, SymmetryReport};
}
