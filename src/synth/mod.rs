//! Waveform synthesis core.
//!
//! Responsibilities, always exercised in this order:
//!
//! - validate the physical parameters and clamp the requested time domain
//! - compute the regime switch time `u_cut(nu)`
//! - evaluate the adiabatic and GUI models on their sub-ranges
//! - stitch both segments into one phase-continuous series

pub mod cutoff;
pub mod engine;
pub(crate) mod regime;
pub(crate) mod stitch;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use cutoff::*;
pub use engine::*;
pub use validate::*;
