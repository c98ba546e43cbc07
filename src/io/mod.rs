//! Input/output helpers.
//!
//! - per-sample CSV export (`export`)
//! - waveform JSON read/write (`waveform`)

pub mod export;
pub mod waveform;

pub use export::*;
pub use waveform::*;
