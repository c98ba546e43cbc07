//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - physical inputs (`PhysicalParameters`, `Parity`, `TimeDomain`, `TimeRange`)
//! - model identifiers (`Regime`, `Quantity`, `ModelKey`)
//! - synthesis outputs (`WaveformResult`, `SynthesisWarning`, `WaveformFile`)

pub mod types;

pub use types::*;
