//! Homogenization methods
//!
//! The tensorial Mori-Tanaka scheme, and the scalar Halpin-Tsai lamina estimate
//! with laminate averaging.

mod halpin_tsai;
mod laminate;
mod mori_tanaka;

pub use halpin_tsai::{FiberPacking, HalpinTsai};
pub use laminate::{Laminate, Ply};
pub use mori_tanaka::MoriTanaka;
