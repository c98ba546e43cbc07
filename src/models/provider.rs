//! The provider capability consumed by the synthesis engine.

use std::sync::Arc;

use crate::domain::{Quantity, Regime};
use crate::error::WaveformError;
use crate::math::Polynomial;

/// Source of the fitted phase/amplitude polynomials.
///
/// Implementations must be safe for concurrent reads: independent syntheses
/// (e.g. a `nu` sweep) share one provider across threads.
pub trait PolynomialProvider: Send + Sync {
    /// Load the model for `(regime, quantity)`.
    ///
    /// A missing or corrupt model is reported as
    /// [`WaveformError::PolynomialUnavailable`].
    fn load(&self, regime: Regime, quantity: Quantity) -> Result<Arc<Polynomial>, WaveformError>;
}
