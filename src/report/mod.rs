//! Reporting utilities: junction diagnostics and formatted terminal output.

use crate::domain::WaveformResult;

pub mod format;

pub use format::*;

/// What happens across the adiabatic/GUI boundary of a stitched result.
///
/// Phase is matched exactly by the stitcher; amplitude is not, so
/// `amplitude_ratio` measures the intrinsic model mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionDiagnostics {
    /// Index of the first GUI sample.
    pub index: usize,
    pub u_left: f64,
    pub u_right: f64,
    pub phase_jump: f64,
    pub amplitude_left: f64,
    pub amplitude_right: f64,
    /// `amplitude_right / amplitude_left` (NaN when the left amplitude is zero).
    pub amplitude_ratio: f64,
}

/// Diagnostics at the junction, or `None` when only one regime is present.
pub fn junction_diagnostics(result: &WaveformResult) -> Option<JunctionDiagnostics> {
    let index = result.junction?;
    if index == 0 || index >= result.len() {
        return None;
    }

    let left = index - 1;
    let amplitude_left = result.amplitude[left];
    let amplitude_right = result.amplitude[index];
    let amplitude_ratio = if amplitude_left == 0.0 {
        f64::NAN
    } else {
        amplitude_right / amplitude_left
    };

    Some(JunctionDiagnostics {
        index,
        u_left: result.times[left],
        u_right: result.times[index],
        phase_jump: result.phase[index] - result.phase[left],
        amplitude_left,
        amplitude_right,
        amplitude_ratio,
    })
}
