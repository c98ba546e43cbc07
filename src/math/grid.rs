//! Uniform retarded-time grids.
//!
//! Grids follow the half-open `arange` convention the models were calibrated
//! with: `ceil((end - start) / step)` samples at `start + i * step`. Samples
//! are computed from the index rather than by repeated addition so long grids
//! do not accumulate rounding drift.

use crate::error::WaveformError;

/// Refuse grids larger than this (a typo in `step` would otherwise exhaust memory).
const MAX_SAMPLES: usize = 50_000_000;

/// Generate `start, start + step, ...` strictly below `end`.
pub fn arange(start: f64, end: f64, step: f64) -> Result<Vec<f64>, WaveformError> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) {
        return Err(WaveformError::InvalidParameter(format!(
            "Invalid time range: start={start}, end={end}, step={step} (must be finite)."
        )));
    }
    if step <= 0.0 {
        return Err(WaveformError::InvalidParameter(format!(
            "Time step must be > 0 (got {step})."
        )));
    }
    if end <= start {
        return Err(WaveformError::InvalidParameter(format!(
            "End time must be greater than start time (start={start}, end={end})."
        )));
    }

    let count = ((end - start) / step).ceil();
    if count > MAX_SAMPLES as f64 {
        return Err(WaveformError::InvalidParameter(format!(
            "Time range produces {count} samples (limit {MAX_SAMPLES})."
        )));
    }
    let count = count as usize;

    Ok((0..count).map(|i| start + step * i as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arange_excludes_end() {
        let v = arange(0.0, 1.0, 0.25).unwrap();
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn arange_partial_last_step_is_kept() {
        let v = arange(-1e5, 1e3, 10.0).unwrap();
        assert_eq!(v.len(), 10_100);
        assert_eq!(v[0], -1e5);
        assert!((v[v.len() - 1] - 990.0).abs() < 1e-9);
    }

    #[test]
    fn default_grid_has_expected_extent() {
        let v = arange(-3000.0, 100.0, 0.1).unwrap();
        assert!((v.len() as i64 - 31_000).abs() <= 1);
        assert_eq!(v[0], -3000.0);
        assert!(*v.last().unwrap() < 100.0);
        assert!(v.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn arange_rejects_bad_ranges() {
        assert!(arange(1.0, 0.0, 0.1).is_err());
        assert!(arange(0.0, 1.0, 0.0).is_err());
        assert!(arange(0.0, 1.0, -0.1).is_err());
        assert!(arange(0.0, f64::INFINITY, 0.1).is_err());
        assert!(arange(0.0, 1.0, 1e-12).is_err());
    }
}
