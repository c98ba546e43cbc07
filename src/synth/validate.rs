//! Parameter and time-domain validation.
//!
//! The models are only meaningful for `0 < nu < 0.25` and for retarded times in
//! `[-250 / nu, 100]`. Out-of-range samples are dropped rather than rejected;
//! the caller learns about it through the returned [`Truncation`] (and a log
//! event). A domain that ends up empty is an error.

use tracing::warn;

use crate::domain::{NU_MAX, PhysicalParameters, TimeDomain, Truncation, U_MAX, lower_time_bound};
use crate::error::WaveformError;

/// A domain that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDomain {
    pub domain: TimeDomain,
    /// Present when samples were dropped.
    pub truncation: Option<Truncation>,
}

/// Check `nu`, `l` and `m`.
///
/// Parity needs no runtime check: unknown tags are rejected when parsed.
pub fn validate_parameters(params: &PhysicalParameters) -> Result<(), WaveformError> {
    let nu = params.nu;
    if !(nu.is_finite() && nu > 0.0 && nu < NU_MAX) {
        return Err(WaveformError::InvalidParameter(format!(
            "nu must be in (0, {NU_MAX}) (got {nu})"
        )));
    }
    for (name, value) in [("l", params.l), ("m", params.m)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(WaveformError::InvalidParameter(format!(
                "multipolar index {name} must be a positive number (got {value})"
            )));
        }
    }
    Ok(())
}

/// Validate parameters and clamp `times` to `[-250 / nu, 100]`.
///
/// `times` is left untouched; the validated domain is a fresh copy.
pub fn validate(params: &PhysicalParameters, times: &TimeDomain) -> Result<ValidatedDomain, WaveformError> {
    validate_parameters(params)?;

    let lower = lower_time_bound(params.nu);
    let upper = U_MAX;

    let (Some(first), Some(last)) = (times.first(), times.last()) else {
        return Err(WaveformError::EmptyDomain(
            "no time samples were requested".to_string(),
        ));
    };

    // Samples are strictly increasing, so the ends are the extrema.
    if first >= lower && last <= upper {
        return Ok(ValidatedDomain {
            domain: times.clone(),
            truncation: None,
        });
    }

    let kept: Vec<f64> = times
        .as_slice()
        .iter()
        .copied()
        .filter(|&u| (lower..=upper).contains(&u))
        .collect();

    let truncation = Truncation {
        requested: times.len(),
        kept: kept.len(),
        lower,
        upper,
    };
    warn!(
        requested = truncation.requested,
        kept = truncation.kept,
        lower,
        upper,
        "time domain truncated to physically valid range"
    );

    if kept.is_empty() {
        return Err(WaveformError::EmptyDomain(format!(
            "no time samples inside the valid range [{lower}, {upper}] for nu={}",
            params.nu
        )));
    }

    Ok(ValidatedDomain {
        domain: TimeDomain::new(kept)?,
        truncation: Some(truncation),
    })
}
