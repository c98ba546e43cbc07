//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during synthesis
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use nalgebra::Complex;
use serde::{Deserialize, Serialize};

use crate::error::WaveformError;

/// Upper (exclusive) bound of the symmetric mass ratio.
pub const NU_MAX: f64 = 0.25;

/// Latest retarded time covered by the models.
pub const U_MAX: f64 = 100.0;

/// Earliest valid retarded time is `U_MIN_SCALE / nu`.
pub const U_MIN_SCALE: f64 = -250.0;

/// Default `arange(-3000, 100, 0.1)` grid.
pub const DEFAULT_TIME_RANGE: TimeRange = TimeRange {
    start: -3.0e3,
    end: 100.0,
    step: 0.1,
};

/// Earliest physically valid retarded time for a given mass ratio.
pub fn lower_time_bound(nu: f64) -> f64 {
    U_MIN_SCALE / nu
}

/// Mode parity under the reflection symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[value(name = "e", alias = "even")]
    Even,
    #[value(name = "o", alias = "odd")]
    Odd,
}

impl Parity {
    /// Single-letter tag used in labels (`ψ_22^(e)`).
    pub fn tag(self) -> &'static str {
        match self {
            Parity::Even => "e",
            Parity::Odd => "o",
        }
    }
}

impl FromStr for Parity {
    type Err = WaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "even" => Ok(Parity::Even),
            "o" | "odd" => Ok(Parity::Odd),
            other => Err(WaveformError::InvalidParameter(format!(
                "parity must be 'e' or 'o' (got '{other}')"
            ))),
        }
    }
}

/// Which analytic description a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Early inspiral, `u <= u_cut`.
    Adiabatic,
    /// Geodesic universal inspiral, `u > u_cut`.
    Gui,
}

impl Regime {
    pub fn display_name(self) -> &'static str {
        match self {
            Regime::Adiabatic => "adiabatic",
            Regime::Gui => "gui",
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            Regime::Adiabatic => "adb",
            Regime::Gui => "gui",
        }
    }
}

/// Which fitted curve of a regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Phase,
    Amplitude,
}

impl Quantity {
    pub fn display_name(self) -> &'static str {
        match self {
            Quantity::Phase => "phase",
            Quantity::Amplitude => "amplitude",
        }
    }

    fn file_infix(self) -> &'static str {
        match self {
            Quantity::Phase => "phase",
            Quantity::Amplitude => "amp",
        }
    }
}

/// Identifies one of the four polynomial models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub regime: Regime,
    pub quantity: Quantity,
}

impl ModelKey {
    pub const ALL: [ModelKey; 4] = [
        ModelKey::new(Regime::Adiabatic, Quantity::Phase),
        ModelKey::new(Regime::Adiabatic, Quantity::Amplitude),
        ModelKey::new(Regime::Gui, Quantity::Phase),
        ModelKey::new(Regime::Gui, Quantity::Amplitude),
    ];

    pub const fn new(regime: Regime, quantity: Quantity) -> Self {
        Self { regime, quantity }
    }

    /// File stem of the serialized model, e.g. `adb_amp_polynomial`.
    pub fn file_stem(self) -> String {
        format!(
            "{}_{}_polynomial",
            self.regime.file_prefix(),
            self.quantity.file_infix()
        )
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.regime.display_name(), self.quantity.display_name())
    }
}

/// Physical inputs of a single synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Symmetric mass ratio, `0 < nu < 0.25`.
    pub nu: f64,
    pub parity: Parity,
    /// First multipolar index.
    pub l: f64,
    /// Second multipolar index.
    pub m: f64,
}

impl PhysicalParameters {
    /// Dominant `(2, 2)` even mode for the given mass ratio.
    pub fn dominant(nu: f64) -> Self {
        Self {
            nu,
            ..Self::default()
        }
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            nu: 1.0e-6,
            parity: Parity::Even,
            l: 2.0,
            m: 2.0,
        }
    }
}

/// `start,end,step` description of a uniform grid (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl TimeRange {
    pub fn to_domain(self) -> Result<TimeDomain, WaveformError> {
        let samples = crate::math::arange(self.start, self.end, self.step)?;
        TimeDomain::new(samples)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) step {}", self.start, self.end, self.step)
    }
}

/// Strictly increasing retarded-time samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeDomain {
    samples: Vec<f64>,
}

impl TimeDomain {
    /// Build a domain, rejecting non-finite or non-increasing samples.
    pub fn new(samples: Vec<f64>) -> Result<Self, WaveformError> {
        if let Some(idx) = samples.iter().position(|u| !u.is_finite()) {
            return Err(WaveformError::InvalidParameter(format!(
                "time sample {idx} is not finite"
            )));
        }
        if let Some(idx) = samples.windows(2).position(|w| w[1] <= w[0]) {
            return Err(WaveformError::InvalidParameter(format!(
                "time samples must be strictly increasing (u[{}]={} >= u[{}]={})",
                idx,
                samples[idx],
                idx + 1,
                samples[idx + 1]
            )));
        }
        Ok(Self { samples })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.samples.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.samples.last().copied()
    }
}

/// Record of samples dropped by the domain validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Truncation {
    pub requested: usize,
    pub kept: usize,
    pub lower: f64,
    pub upper: f64,
}

impl Truncation {
    pub fn dropped(&self) -> usize {
        self.requested - self.kept
    }
}

/// Non-fatal events raised while synthesizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SynthesisWarning {
    TimeDomainTruncated(Truncation),
}

impl fmt::Display for SynthesisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisWarning::TimeDomainTruncated(t) => write!(
                f,
                "time domain truncated to physically valid range [{:.1}, {:.1}] ({} of {} samples dropped)",
                t.lower,
                t.upper,
                t.dropped(),
                t.requested
            ),
        }
    }
}

/// One regime's contribution before stitching.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RegimeSegment {
    pub regime: Regime,
    pub times: Vec<f64>,
    pub phase: Vec<f64>,
    pub amplitude: Vec<f64>,
    pub waveform: Vec<Complex<f64>>,
}

/// The synthesized mode over the validated domain.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformResult {
    pub parameters: PhysicalParameters,
    /// Regime switch time `u_cut(nu)`.
    pub u_cut: f64,
    pub times: Vec<f64>,
    pub phase: Vec<f64>,
    pub amplitude: Vec<f64>,
    /// `amplitude * exp(i * phase)`.
    pub waveform: Vec<Complex<f64>>,
    /// Index of the first GUI sample when both regimes are present.
    pub junction: Option<usize>,
    pub warnings: Vec<SynthesisWarning>,
}

impl WaveformResult {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Regime that produced sample `idx`.
    pub fn regime_at(&self, idx: usize) -> Regime {
        if self.times[idx] <= self.u_cut {
            Regime::Adiabatic
        } else {
            Regime::Gui
        }
    }

    /// Real part of the complex waveform.
    pub fn real(&self) -> Vec<f64> {
        self.waveform.iter().map(|z| z.re).collect()
    }

    /// Number of adiabatic samples (they always come first).
    pub fn adiabatic_len(&self) -> usize {
        self.times.partition_point(|&u| u <= self.u_cut)
    }
}

/// Which series to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotKind {
    /// Real part of the waveform.
    Waveform,
    Phase,
    Amplitude,
    /// All three, one after another.
    All,
    /// No plot.
    None,
}

impl PlotKind {
    /// Concrete series selected by this option (in display order).
    pub fn series(self) -> &'static [Series] {
        match self {
            PlotKind::Waveform => &[Series::Waveform],
            PlotKind::Phase => &[Series::Phase],
            PlotKind::Amplitude => &[Series::Amplitude],
            PlotKind::All => &[Series::Waveform, Series::Phase, Series::Amplitude],
            PlotKind::None => &[],
        }
    }
}

/// A single plottable series of a [`WaveformResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Waveform,
    Phase,
    Amplitude,
}

impl Series {
    pub fn next(self) -> Self {
        match self {
            Series::Waveform => Series::Phase,
            Series::Phase => Series::Amplitude,
            Series::Amplitude => Series::Waveform,
        }
    }

    /// Axis label for the series of mode `(l, m)` with the given parity.
    pub fn label(self, params: &PhysicalParameters) -> String {
        let mode = format!("{}{}", params.l, params.m);
        let parity = params.parity.tag();
        match self {
            Series::Waveform => format!("Re(psi_{mode}^({parity}))/nu"),
            Series::Phase => format!("phi_{mode}^({parity})"),
            Series::Amplitude => format!("A_{mode}^({parity})/nu"),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus prompts and defaults).
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    pub parameters: PhysicalParameters,
    pub time_range: TimeRange,
    pub polynomial_dir: PathBuf,

    pub plot: PlotKind,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A saved waveform file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub parameters: PhysicalParameters,
    pub u_cut: f64,
    pub junction: Option<usize>,
    pub u: Vec<f64>,
    pub phase: Vec<f64>,
    pub amplitude: Vec<f64>,
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_file_stems_match_exported_names() {
        let stems: Vec<String> = ModelKey::ALL.iter().map(|k| k.file_stem()).collect();
        assert_eq!(
            stems,
            vec![
                "adb_phase_polynomial",
                "adb_amp_polynomial",
                "gui_phase_polynomial",
                "gui_amp_polynomial",
            ]
        );
    }

    #[test]
    fn parity_parses_short_and_long_tags() {
        assert_eq!("e".parse::<Parity>().unwrap(), Parity::Even);
        assert_eq!("Odd".parse::<Parity>().unwrap(), Parity::Odd);
        let err = "x".parse::<Parity>().unwrap_err();
        assert!(matches!(err, WaveformError::InvalidParameter(_)));
    }

    #[test]
    fn time_domain_rejects_unordered_samples() {
        assert!(TimeDomain::new(vec![0.0, 1.0, 1.0]).is_err());
        assert!(TimeDomain::new(vec![0.0, f64::NAN]).is_err());
        assert_eq!(TimeDomain::new(vec![-1.0, 0.5]).unwrap().len(), 2);
    }

    #[test]
    fn truncation_warning_mentions_bounds() {
        let w = SynthesisWarning::TimeDomainTruncated(Truncation {
            requested: 10,
            kept: 7,
            lower: -250.0,
            upper: 100.0,
        });
        let msg = w.to_string();
        assert!(msg.contains("truncated"));
        assert!(msg.contains("3 of 10"));
    }
}
