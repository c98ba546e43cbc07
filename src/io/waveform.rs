//! Read/write waveform JSON files.
//!
//! Waveform JSON is the "portable" representation of a synthesized mode:
//! - physical parameters (`nu`, parity, `l`, `m`) and `u_cut`
//! - the junction index between the adiabatic and GUI samples
//! - the full `u`, phase, amplitude and complex waveform arrays
//!
//! The schema is defined by `domain::WaveformFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use crate::domain::{WaveformFile, WaveformResult};
use crate::error::AppError;

/// Tool name stamped into exported files.
pub const TOOL_NAME: &str = "uwave";

/// Convert a result into its serializable form.
pub fn to_waveform_file(result: &WaveformResult) -> WaveformFile {
    WaveformFile {
        tool: TOOL_NAME.to_string(),
        generated: Utc::now(),
        parameters: result.parameters,
        u_cut: result.u_cut,
        junction: result.junction,
        u: result.times.clone(),
        phase: result.phase.clone(),
        amplitude: result.amplitude.clone(),
        re: result.waveform.iter().map(|z| z.re).collect(),
        im: result.waveform.iter().map(|z| z.im).collect(),
    }
}

/// Write a waveform JSON file.
pub fn write_waveform_json(path: &Path, result: &WaveformResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create waveform JSON '{}': {e}", path.display())))?;

    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &to_waveform_file(result))
        .map_err(|e| AppError::new(4, format!("Failed to write waveform JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush waveform JSON: {e}")))?;

    Ok(())
}

/// Read a waveform JSON file.
pub fn read_waveform_json(path: &Path) -> Result<WaveformFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open waveform JSON '{}': {e}", path.display())))?;
    let waveform: WaveformFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid waveform JSON: {e}")))?;

    let n = waveform.u.len();
    let lengths = [
        waveform.phase.len(),
        waveform.amplitude.len(),
        waveform.re.len(),
        waveform.im.len(),
    ];
    if lengths.iter().any(|&len| len != n) {
        return Err(AppError::new(
            2,
            format!("Invalid waveform JSON: array lengths differ (u has {n} samples)."),
        ));
    }

    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::domain::{PhysicalParameters, TimeRange};
    use crate::synth::synthesize;
    use crate::synth::testing::synthetic_provider;

    #[test]
    fn written_file_reloads_with_same_samples() {
        let params = PhysicalParameters::dominant(1e-2);
        let times = TimeRange { start: -500.0, end: 100.0, step: 2.5 }.to_domain().unwrap();
        let result = synthesize(&params, &times, &synthetic_provider()).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mode.json");
        write_waveform_json(&path, &result).unwrap();

        let file = read_waveform_json(&path).unwrap();
        assert_eq!(file.tool, TOOL_NAME);
        assert_eq!(file.parameters.parity, params.parity);
        assert_relative_eq!(file.parameters.nu, params.nu, max_relative = 1e-15);
        assert_relative_eq!(file.u_cut, result.u_cut, max_relative = 1e-15);
        assert_eq!(file.junction, result.junction);
        assert_eq!(file.u.len(), result.len());
        for (a, b) in file.re.iter().zip(result.real()) {
            assert_relative_eq!(*a, b, max_relative = 1e-15, epsilon = 1e-300);
        }
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.json");
        let body = r#"{
            "tool": "uwave",
            "generated": "2025-01-01T00:00:00Z",
            "parameters": {"nu": 0.1, "parity": "even", "l": 2.0, "m": 2.0},
            "u_cut": -100.0,
            "junction": null,
            "u": [0.0, 1.0],
            "phase": [0.0],
            "amplitude": [1.0, 1.0],
            "re": [1.0, 1.0],
            "im": [0.0, 0.0]
        }"#;
        std::fs::write(&path, body).unwrap();

        let err = read_waveform_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
