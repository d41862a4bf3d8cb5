//! Mathematical functions module
//!
//! Conversions between complex responses and Bode quantities, and phase unwrapping.

pub mod conversions;
pub mod unwrap;

pub use conversions::*;
pub use unwrap::{unwrap_degrees, PhaseUnwrapper};
