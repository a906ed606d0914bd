//! Constituent elastic materials

mod isotropy;
mod material;
mod transverse;

pub use isotropy::Isotropy;
pub use material::Material;
pub use transverse::TransverseIsotropy;
