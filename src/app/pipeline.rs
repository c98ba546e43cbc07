//! Shared synthesis pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! time grid -> model provider -> synthesis (-> sweep)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::{PhysicalParameters, SynthesisConfig, TimeRange, WaveformResult};
use crate::error::{AppError, WaveformError};
use crate::models::{DirectoryProvider, PolynomialProvider};
use crate::synth::{synthesize, synthesize_many};

/// Outputs of a single `uwave synth` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub result: WaveformResult,
    /// Wall-clock synthesis time (grid construction excluded).
    pub elapsed: Duration,
}

/// One row of a sweep: the requested parameters and their outcome.
pub type SweepRow = (PhysicalParameters, Result<WaveformResult, WaveformError>);

/// Run synthesis with models read from `config.polynomial_dir`.
pub fn run_synthesis(config: &SynthesisConfig) -> Result<RunOutput, AppError> {
    let provider = DirectoryProvider::new(&config.polynomial_dir);
    run_synthesis_with_provider(config, &provider)
}

/// Run synthesis with an existing provider.
///
/// The TUI keeps one provider alive so re-synthesizing does not re-read models.
pub fn run_synthesis_with_provider(
    config: &SynthesisConfig,
    provider: &dyn PolynomialProvider,
) -> Result<RunOutput, AppError> {
    let times = config.time_range.to_domain()?;
    debug!(samples = times.len(), "built time grid {}", config.time_range);

    let start = Instant::now();
    let result = synthesize(&config.parameters, &times, provider)?;

    Ok(RunOutput {
        result,
        elapsed: start.elapsed(),
    })
}

/// Synthesize every parameter set over the same grid, in parallel.
///
/// Only a bad grid fails the whole sweep; per-request failures stay in their row.
pub fn run_sweep(
    params: &[PhysicalParameters],
    time_range: TimeRange,
    provider: &dyn PolynomialProvider,
) -> Result<Vec<SweepRow>, AppError> {
    let times = time_range.to_domain()?;
    let results = synthesize_many(params, &times, provider);
    Ok(params.iter().copied().zip(results).collect())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{ModelKey, PlotKind};
    use crate::synth::testing::synthetic_provider;

    fn write_models(dir: &std::path::Path) {
        let provider = synthetic_provider();
        for key in ModelKey::ALL {
            let poly = provider.load(key.regime, key.quantity).unwrap();
            let body = serde_json::to_string(&*poly).unwrap();
            std::fs::write(dir.join(format!("{}.json", key.file_stem())), body).unwrap();
        }
    }

    fn config(dir: PathBuf, nu: f64) -> SynthesisConfig {
        SynthesisConfig {
            parameters: PhysicalParameters::dominant(nu),
            time_range: TimeRange { start: -1000.0, end: 100.0, step: 1.0 },
            polynomial_dir: dir,
            plot: PlotKind::None,
            plot_width: 80,
            plot_height: 20,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn directory_models_match_in_memory_models() {
        let tmp = tempfile::tempdir().unwrap();
        write_models(tmp.path());

        let cfg = config(tmp.path().to_path_buf(), 1e-2);
        let from_disk = run_synthesis(&cfg).unwrap().result;
        let in_memory = run_synthesis_with_provider(&cfg, &synthetic_provider()).unwrap().result;
        assert_eq!(from_disk, in_memory);
    }

    #[test]
    fn missing_directory_maps_to_model_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path().join("nope"), 1e-2);
        let err = run_synthesis(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn sweep_keeps_failures_in_their_rows() {
        let params = [PhysicalParameters::dominant(0.01), PhysicalParameters::dominant(0.5)];
        let range = TimeRange { start: -500.0, end: 100.0, step: 1.0 };
        let rows = run_sweep(&params, range, &synthetic_provider()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].1.is_ok());
        assert!(rows[1].1.is_err());
        assert_eq!(rows[1].0.nu, 0.5);
    }

    #[test]
    fn bad_grid_fails_the_sweep() {
        let params = [PhysicalParameters::dominant(0.01)];
        let range = TimeRange { start: 0.0, end: 1.0, step: 0.0 };
        let err = run_sweep(&params, range, &synthetic_provider()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
