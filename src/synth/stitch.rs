//! Joining the adiabatic and GUI segments.
//!
//! The adiabatic phase is defined up to a constant, so it is shifted to land
//! exactly on the first GUI phase; the complex samples are rotated by the same
//! angle. Amplitudes are concatenated as-is: their mismatch at the junction is
//! a property of the models and is reported, not corrected.

use nalgebra::Complex;

use crate::domain::RegimeSegment;
use crate::error::WaveformError;

/// Stitched series (adiabatic samples first).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Stitched {
    pub times: Vec<f64>,
    pub phase: Vec<f64>,
    pub amplitude: Vec<f64>,
    pub waveform: Vec<Complex<f64>>,
    /// Index of the first GUI sample when both segments were present.
    pub junction: Option<usize>,
}

impl From<RegimeSegment> for Stitched {
    fn from(seg: RegimeSegment) -> Self {
        Self {
            times: seg.times,
            phase: seg.phase,
            amplitude: seg.amplitude,
            waveform: seg.waveform,
            junction: None,
        }
    }
}

/// Combine the segments of a partitioned domain.
pub(crate) fn stitch(
    adiabatic: Option<RegimeSegment>,
    gui: Option<RegimeSegment>,
) -> Result<Stitched, WaveformError> {
    match (adiabatic, gui) {
        (Some(adb), Some(gui)) => join(adb, gui),
        (Some(seg), None) | (None, Some(seg)) => Ok(seg.into()),
        (None, None) => Err(WaveformError::EmptyDomain(
            "neither regime produced samples".to_string(),
        )),
    }
}

fn join(adb: RegimeSegment, gui: RegimeSegment) -> Result<Stitched, WaveformError> {
    let (Some(&adb_last), Some(&gui_first)) = (adb.phase.last(), gui.phase.first()) else {
        return Err(WaveformError::EmptyDomain(
            "cannot stitch an empty segment".to_string(),
        ));
    };

    let shift = adb_last - gui_first;
    let rotation = Complex::cis(-shift);
    let junction = adb.times.len();

    let phase = adb
        .phase
        .into_iter()
        .map(|phi| phi - shift)
        .chain(gui.phase)
        .collect();
    let waveform = adb
        .waveform
        .into_iter()
        .map(|z| z * rotation)
        .chain(gui.waveform)
        .collect();
    let times = adb.times.into_iter().chain(gui.times).collect();
    let amplitude = adb.amplitude.into_iter().chain(gui.amplitude).collect();

    Ok(Stitched {
        times,
        phase,
        amplitude,
        waveform,
        junction: Some(junction),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::domain::Regime;

    fn segment(regime: Regime, times: &[f64], phase: &[f64], amplitude: &[f64]) -> RegimeSegment {
        RegimeSegment {
            regime,
            times: times.to_vec(),
            phase: phase.to_vec(),
            amplitude: amplitude.to_vec(),
            waveform: amplitude
                .iter()
                .zip(phase)
                .map(|(&a, &p)| Complex::from_polar(a, p))
                .collect(),
        }
    }

    #[test]
    fn shifts_adiabatic_phase_onto_gui() {
        let adb = segment(Regime::Adiabatic, &[-3.0, -2.0, -1.0], &[10.0, 11.0, 12.5], &[0.2, 0.3, 0.4]);
        let gui = segment(Regime::Gui, &[0.0, 1.0], &[2.0, 3.0], &[0.5, 0.6]);

        let out = stitch(Some(adb), Some(gui)).unwrap();
        assert_eq!(out.junction, Some(3));
        assert_eq!(out.times, vec![-3.0, -2.0, -1.0, 0.0, 1.0]);
        assert_eq!(out.phase, vec![-0.5, 0.5, 2.0, 2.0, 3.0]);
        // Amplitudes are never rescaled.
        assert_eq!(out.amplitude, vec![0.2, 0.3, 0.4, 0.5, 0.6]);

        // Phase and waveform stay mutually consistent after the shift.
        for i in 0..out.times.len() {
            let expected = Complex::from_polar(out.amplitude[i], out.phase[i]);
            assert_relative_eq!(out.waveform[i].re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(out.waveform[i].im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_segment_passes_through_verbatim() {
        let adb = segment(Regime::Adiabatic, &[-2.0, -1.0], &[7.0, 8.0], &[0.1, 0.2]);
        let out = stitch(Some(adb.clone()), None).unwrap();
        assert_eq!(out.phase, adb.phase);
        assert_eq!(out.waveform, adb.waveform);
        assert_eq!(out.junction, None);

        let gui = segment(Regime::Gui, &[1.0, 2.0], &[4.0, 5.0], &[0.3, 0.4]);
        let out = stitch(None, Some(gui.clone())).unwrap();
        assert_eq!(out.phase, gui.phase);
        assert_eq!(out.times, gui.times);
        assert_eq!(out.waveform, gui.waveform);
    }

    #[test]
    fn nothing_to_stitch_is_an_error() {
        assert!(matches!(stitch(None, None), Err(WaveformError::EmptyDomain(_))));
    }
}
