//! Directory-backed provider reading model JSON files.
//!
//! Layout (one file per model, names fixed by the exporter):
//!
//! ```text
//! <dir>/adb_phase_polynomial.json
//! <dir>/adb_amp_polynomial.json
//! <dir>/gui_phase_polynomial.json
//! <dir>/gui_amp_polynomial.json
//! ```
//!
//! Each file holds `{"coefficients": [...]}` with the highest degree first.
//! Loaded models are cached for the lifetime of the provider.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::domain::{ModelKey, Quantity, Regime};
use crate::error::WaveformError;
use crate::math::Polynomial;

use super::PolynomialProvider;

/// Default model directory (relative to the working directory).
pub const DEFAULT_POLYNOMIAL_DIR: &str = "Polynomials";

/// Provider that lazily reads models from a directory.
#[derive(Debug)]
pub struct DirectoryProvider {
    dir: PathBuf,
    cache: RwLock<HashMap<ModelKey, Arc<Polynomial>>>,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Path of the file holding `key`.
    pub fn model_path(&self, key: ModelKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.file_stem()))
    }

    /// Load all four models up front so a broken deployment fails early.
    pub fn preload(&self) -> Result<(), WaveformError> {
        for key in ModelKey::ALL {
            self.load(key.regime, key.quantity)?;
        }
        Ok(())
    }

    fn read_model(&self, key: ModelKey) -> Result<Polynomial, WaveformError> {
        let path = self.model_path(key);
        let unavailable = |reason: String| WaveformError::PolynomialUnavailable { key, reason };

        if !path.exists() {
            return Err(unavailable(format!(
                "polynomial file not found: {}",
                path.display()
            )));
        }

        let file = File::open(&path)
            .map_err(|e| unavailable(format!("failed to open '{}': {e}", path.display())))?;
        let poly: Polynomial = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| unavailable(format!("invalid model JSON '{}': {e}", path.display())))?;
        poly.validate()
            .map_err(|e| unavailable(format!("corrupt model '{}': {e}", path.display())))?;

        debug!(model = %key, path = %path.display(), degree = poly.degree(), "loaded polynomial model");
        Ok(poly)
    }
}

impl PolynomialProvider for DirectoryProvider {
    fn load(&self, regime: Regime, quantity: Quantity) -> Result<Arc<Polynomial>, WaveformError> {
        let key = ModelKey::new(regime, quantity);

        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(poly) = cache.get(&key) {
                return Ok(Arc::clone(poly));
            }
        }

        let poly = Arc::new(self.read_model(key)?);
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        Ok(Arc::clone(cache.entry(key).or_insert(poly)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn write_model(dir: &Path, key: ModelKey, body: &str) {
        fs::write(dir.join(format!("{}.json", key.file_stem())), body).unwrap();
    }

    #[test]
    fn loads_and_caches_models() {
        let tmp = tempfile::tempdir().unwrap();
        let key = ModelKey::new(Regime::Gui, Quantity::Amplitude);
        write_model(tmp.path(), key, r#"{"coefficients": [0.5, 1.0]}"#);

        let provider = DirectoryProvider::new(tmp.path());
        let first = provider.load(Regime::Gui, Quantity::Amplitude).unwrap();
        assert_eq!(first.eval(2.0), 2.0);

        // Removing the file must not matter once the model is cached.
        fs::remove_file(provider.model_path(key)).unwrap();
        let second = provider.load(Regime::Gui, Quantity::Amplitude).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = DirectoryProvider::new(tmp.path());
        let err = provider.load(Regime::Adiabatic, Quantity::Phase).unwrap_err();
        match err {
            WaveformError::PolynomialUnavailable { key, reason } => {
                assert_eq!(key.regime, Regime::Adiabatic);
                assert!(reason.contains("adb_phase_polynomial.json"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn corrupt_files_are_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        write_model(
            tmp.path(),
            ModelKey::new(Regime::Adiabatic, Quantity::Amplitude),
            "not json",
        );
        write_model(
            tmp.path(),
            ModelKey::new(Regime::Gui, Quantity::Phase),
            r#"{"coefficients": []}"#,
        );

        let provider = DirectoryProvider::new(tmp.path());
        assert!(matches!(
            provider.load(Regime::Adiabatic, Quantity::Amplitude),
            Err(WaveformError::PolynomialUnavailable { .. })
        ));
        assert!(matches!(
            provider.load(Regime::Gui, Quantity::Phase),
            Err(WaveformError::PolynomialUnavailable { .. })
        ));
        assert!(provider.preload().is_err());
    }
}
