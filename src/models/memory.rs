//! In-memory provider for models built in code.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{ModelKey, Quantity, Regime};
use crate::error::WaveformError;
use crate::math::Polynomial;

/// Provider backed by a fixed map of models.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    models: HashMap<ModelKey, Arc<Polynomial>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the model for `(regime, quantity)`.
    pub fn with_model(mut self, regime: Regime, quantity: Quantity, poly: Polynomial) -> Self {
        self.insert(regime, quantity, poly);
        self
    }

    pub fn insert(&mut self, regime: Regime, quantity: Quantity, poly: Polynomial) {
        self.models.insert(ModelKey::new(regime, quantity), Arc::new(poly));
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl super::PolynomialProvider for InMemoryProvider {
    fn load(&self, regime: Regime, quantity: Quantity) -> Result<Arc<Polynomial>, WaveformError> {
        let key = ModelKey::new(regime, quantity);
        self.models
            .get(&key)
            .cloned()
            .ok_or_else(|| WaveformError::PolynomialUnavailable {
                key,
                reason: "model not registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PolynomialProvider;

    #[test]
    fn missing_model_names_the_key() {
        let provider = InMemoryProvider::new().with_model(
            Regime::Gui,
            Quantity::Phase,
            Polynomial::new(vec![1.0]).unwrap(),
        );
        assert!(provider.load(Regime::Gui, Quantity::Phase).is_ok());
        assert_eq!(provider.len(), 1);

        let err = provider.load(Regime::Gui, Quantity::Amplitude).unwrap_err();
        match err {
            WaveformError::PolynomialUnavailable { key, .. } => {
                assert_eq!(key, ModelKey::new(Regime::Gui, Quantity::Amplitude));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn insert_replaces_existing_model() {
        let mut provider = InMemoryProvider::new();
        assert!(provider.is_empty());

        provider.insert(Regime::Adiabatic, Quantity::Amplitude, Polynomial::new(vec![1.0]).unwrap());
        provider.insert(Regime::Adiabatic, Quantity::Amplitude, Polynomial::new(vec![2.0]).unwrap());
        assert_eq!(provider.len(), 1);
        assert!(!provider.is_empty());

        let poly = provider.load(Regime::Adiabatic, Quantity::Amplitude).unwrap();
        assert_eq!(poly.eval(0.0), 2.0);
    }
}
