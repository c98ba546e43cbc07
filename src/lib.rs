//! `universal-waveforms` library crate.
//!
//! The binary (`uwave`) is a thin wrapper around this library so that:
//!
//! - the synthesis core is testable without spawning processes
//! - model providers can be swapped (directory, in-memory, embedded)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod synth;
pub mod tui;
