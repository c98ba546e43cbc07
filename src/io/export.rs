//! Export per-sample results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::WaveformResult;
use crate::error::AppError;

/// Write `u,phase,amplitude,re,im,regime` rows to a CSV file.
pub fn write_waveform_csv(path: &Path, result: &WaveformResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "u,phase,amplitude,re,im,regime")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for i in 0..result.len() {
        let z = result.waveform[i];
        writeln!(
            out,
            "{:.6},{:.12e},{:.12e},{:.12e},{:.12e},{}",
            result.times[i],
            result.phase[i],
            result.amplitude[i],
            z.re,
            z.im,
            result.regime_at(i).display_name(),
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}
