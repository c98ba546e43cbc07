//! Per-regime model evaluation.
//!
//! Adiabatic models are fitted in the rescaled time `tau = nu * (u - u_cut)`
//! (zero at the cutoff) and their phase output is scaled by `m / nu`. GUI
//! models are evaluated directly on `u`.

use nalgebra::Complex;

use crate::domain::{ModelKey, Quantity, Regime, RegimeSegment};
use crate::error::WaveformError;
use crate::math::Polynomial;
use crate::models::PolynomialProvider;

/// Evaluate the adiabatic segment on `times` (all `<= u_cut`).
pub(crate) fn evaluate_adiabatic(
    times: &[f64],
    nu: f64,
    m: f64,
    u_cut: f64,
    provider: &dyn PolynomialProvider,
) -> Result<RegimeSegment, WaveformError> {
    require_samples(Regime::Adiabatic, times)?;

    let phase_poly = provider.load(Regime::Adiabatic, Quantity::Phase)?;
    let amp_poly = provider.load(Regime::Adiabatic, Quantity::Amplitude)?;

    let tau: Vec<f64> = times.iter().map(|&u| nu * (u - u_cut)).collect();
    let scale = m / nu;

    let phase = eval_checked(
        &phase_poly,
        ModelKey::new(Regime::Adiabatic, Quantity::Phase),
        &tau,
        scale,
    )?;
    let amplitude = eval_checked(
        &amp_poly,
        ModelKey::new(Regime::Adiabatic, Quantity::Amplitude),
        &tau,
        1.0,
    )?;

    Ok(build_segment(Regime::Adiabatic, times, phase, amplitude))
}

/// Evaluate the GUI segment on `times` (all `> u_cut`).
pub(crate) fn evaluate_gui(
    times: &[f64],
    provider: &dyn PolynomialProvider,
) -> Result<RegimeSegment, WaveformError> {
    require_samples(Regime::Gui, times)?;

    let phase_poly = provider.load(Regime::Gui, Quantity::Phase)?;
    let amp_poly = provider.load(Regime::Gui, Quantity::Amplitude)?;

    let phase = eval_checked(&phase_poly, ModelKey::new(Regime::Gui, Quantity::Phase), times, 1.0)?;
    let amplitude = eval_checked(
        &amp_poly,
        ModelKey::new(Regime::Gui, Quantity::Amplitude),
        times,
        1.0,
    )?;

    Ok(build_segment(Regime::Gui, times, phase, amplitude))
}

fn require_samples(regime: Regime, times: &[f64]) -> Result<(), WaveformError> {
    if times.is_empty() {
        return Err(WaveformError::EmptyDomain(format!(
            "{} regime evaluated on an empty sub-range",
            regime.display_name()
        )));
    }
    Ok(())
}

/// Evaluate `poly` at each abscissa, scale, and reject non-finite output.
fn eval_checked(poly: &Polynomial, key: ModelKey, xs: &[f64], scale: f64) -> Result<Vec<f64>, WaveformError> {
    let mut out = Vec::with_capacity(xs.len());
    for &x in xs {
        let y = poly.eval(x) * scale;
        if !y.is_finite() {
            return Err(WaveformError::Evaluation {
                key,
                at: x,
                reason: format!("model produced a non-finite value ({y})"),
            });
        }
        out.push(y);
    }
    Ok(out)
}

fn build_segment(regime: Regime, times: &[f64], phase: Vec<f64>, amplitude: Vec<f64>) -> RegimeSegment {
    let waveform = amplitude
        .iter()
        .zip(&phase)
        .map(|(&a, &phi)| Complex::from_polar(a, phi))
        .collect();

    RegimeSegment {
        regime,
        times: times.to_vec(),
        phase,
        amplitude,
        waveform,
    }
}
