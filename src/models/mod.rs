//! Polynomial model providers.
//!
//! The synthesis core never touches storage: it asks a [`PolynomialProvider`]
//! for the four `(regime, quantity)` models and evaluates whatever it gets back.

pub mod directory;
pub mod memory;
pub mod provider;

pub use directory::*;
pub use memory::*;
pub use provider::*;
