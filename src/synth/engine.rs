//! Synthesis entry points.
//!
//! `synthesize` is the only operation the shell needs: validate, partition at
//! `u_cut`, evaluate each non-empty regime, stitch. It holds no state between
//! calls, so independent requests can run in parallel (`synthesize_many`).

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{PhysicalParameters, SynthesisWarning, TimeDomain, WaveformResult};
use crate::error::WaveformError;
use crate::models::PolynomialProvider;
use crate::synth::cutoff::u_cut;
use crate::synth::regime::{evaluate_adiabatic, evaluate_gui};
use crate::synth::stitch::stitch;
use crate::synth::validate::validate;

/// Synthesize one `(l, m, parity)` mode over `times`.
pub fn synthesize(
    params: &PhysicalParameters,
    times: &TimeDomain,
    provider: &dyn PolynomialProvider,
) -> Result<WaveformResult, WaveformError> {
    let start = Instant::now();

    let validated = validate(params, times)?;
    let cut = u_cut(params.nu);

    // Adiabatic owns the cutoff sample itself (`u <= u_cut`).
    let samples = validated.domain.as_slice();
    let split = samples.partition_point(|&u| u <= cut);
    let (adb_times, gui_times) = samples.split_at(split);
    debug!(
        nu = params.nu,
        u_cut = cut,
        adiabatic = adb_times.len(),
        gui = gui_times.len(),
        "partitioned time domain"
    );

    let adiabatic = if adb_times.is_empty() {
        None
    } else {
        Some(evaluate_adiabatic(adb_times, params.nu, params.m, cut, provider)?)
    };
    let gui = if gui_times.is_empty() {
        None
    } else {
        Some(evaluate_gui(gui_times, provider)?)
    };

    let stitched = stitch(adiabatic, gui)?;

    let warnings = validated
        .truncation
        .map(SynthesisWarning::TimeDomainTruncated)
        .into_iter()
        .collect();

    info!(
        samples = stitched.times.len(),
        "calculated waveform in {:.2e} s",
        start.elapsed().as_secs_f64()
    );

    Ok(WaveformResult {
        parameters: *params,
        u_cut: cut,
        times: stitched.times,
        phase: stitched.phase,
        amplitude: stitched.amplitude,
        waveform: stitched.waveform,
        junction: stitched.junction,
        warnings,
    })
}

/// Synthesize several independent requests in parallel (order preserved).
///
/// One failing request does not affect the others.
pub fn synthesize_many(
    params: &[PhysicalParameters],
    times: &TimeDomain,
    provider: &dyn PolynomialProvider,
) -> Vec<Result<WaveformResult, WaveformError>> {
    params
        .par_iter()
        .map(|p| synthesize(p, times, provider))
        .collect()
}
