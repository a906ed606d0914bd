//! Material description shared by matrix and fiber phases

use serde::{Deserialize, Serialize};

use crate::error::HomogenizationResult;
use crate::math::Mat6;

use super::{Isotropy, TransverseIsotropy};

/// Elastic description of a constituent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Isotropic constituent
    Isotropic(Isotropy),
    /// Transversely isotropic constituent, symmetry axis along local x1
    TransverselyIsotropic(TransverseIsotropy),
}

impl Material {
    /// Create an isotropic material from E and nu
    pub fn isotropic(e: f64, nu: f64) -> HomogenizationResult<Self> {
        Ok(Self::Isotropic(Isotropy::new(e, nu)?))
    }

    /// Create a transversely isotropic material
    pub fn transversely_isotropic(
        e_l: f64,
        e_t: f64,
        nu_lt: f64,
        nu_tt: f64,
        g_lt: f64,
    ) -> HomogenizationResult<Self> {
        Ok(Self::TransverselyIsotropic(TransverseIsotropy::new(
            e_l, e_t, nu_lt, nu_tt, g_lt,
        )?))
    }

    /// Stiffness in Mandel notation, expressed in the material frame
    pub fn stiffness(&self) -> HomogenizationResult<Mat6> {
        match self {
            Self::Isotropic(iso) => Ok(iso.stiffness()),
            Self::TransverselyIsotropic(ti) => ti.stiffness(),
        }
    }

    /// Compliance in Mandel notation, expressed in the material frame
    pub fn compliance(&self) -> Mat6 {
        match self {
            Self::Isotropic(iso) => iso.compliance(),
            Self::TransverselyIsotropic(ti) => ti.compliance(),
        }
    }

    /// Check the constants of either variant
    pub fn validate(&self) -> HomogenizationResult<()> {
        match self {
            Self::Isotropic(iso) => iso.validate(),
            Self::TransverselyIsotropic(ti) => ti.validate(),
        }
    }

    /// The isotropic constants, if this material is isotropic
    pub fn as_isotropy(&self) -> Option<&Isotropy> {
        match self {
            Self::Isotropic(iso) => Some(iso),
            Self::TransverselyIsotropic(_) => None,
        }
    }
}

impl From<Isotropy> for Material {
    fn from(iso: Isotropy) -> Self {
        Self::Isotropic(iso)
    }
}

impl From<TransverseIsotropy> for Material {
    fn from(ti: TransverseIsotropy) -> Self {
        Self::TransverselyIsotropic(ti)
    }
}
