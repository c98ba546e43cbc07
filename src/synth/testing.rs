//! Synthetic models and an instrumented provider for tests.

use std::sync::{Arc, Mutex};

use crate::domain::{ModelKey, Quantity, Regime};
use crate::error::WaveformError;
use crate::math::Polynomial;
use crate::models::{InMemoryProvider, PolynomialProvider};

/// Smooth, well-behaved stand-ins for the four fitted models.
///
/// Adiabatic models are expressed in `tau = nu * (u - u_cut) <= 0`, GUI models
/// in `u`. Amplitudes stay positive over the domains the tests use.
pub(crate) fn synthetic_provider() -> InMemoryProvider {
    let poly = |c: &[f64]| Polynomial::new(c.to_vec()).expect("valid test polynomial");
    InMemoryProvider::new()
        .with_model(Regime::Adiabatic, Quantity::Phase, poly(&[0.1, 0.5, -0.2]))
        .with_model(Regime::Adiabatic, Quantity::Amplitude, poly(&[-0.05, 0.3]))
        .with_model(Regime::Gui, Quantity::Phase, poly(&[1e-5, 0.3, 2.0]))
        .with_model(Regime::Gui, Quantity::Amplitude, poly(&[1e-4, 0.5]))
}

/// Records every model request before delegating.
pub(crate) struct CountingProvider<P> {
    inner: P,
    requested: Mutex<Vec<ModelKey>>,
}

impl<P: PolynomialProvider> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<ModelKey> {
        self.requested.lock().expect("request log poisoned").clone()
    }

    pub fn requested_regime(&self, regime: Regime) -> bool {
        self.requested().iter().any(|k| k.regime == regime)
    }
}

impl<P: PolynomialProvider> PolynomialProvider for CountingProvider<P> {
    fn load(&self, regime: Regime, quantity: Quantity) -> Result<Arc<Polynomial>, WaveformError> {
        self.requested
            .lock()
            .expect("request log poisoned")
            .push(ModelKey::new(regime, quantity));
        self.inner.load(regime, quantity)
    }
}
