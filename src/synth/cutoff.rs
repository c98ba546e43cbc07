//! Regime switch time.
//!
//! `u_cut(nu)` is the retarded time after which the geodesic universal inspiral
//! description is more accurate than the adiabatic one:
//!
//! ```text
//! u_cut(nu) = -101.6 nu^(-1/5) + 108.8 - 65 nu^(1/5)
//! ```
//!
//! Small deviations move the stitch point, so the expression is evaluated
//! exactly as written in `f64`.

const NEG_POWER_COEFF: f64 = -101.6;
const OFFSET: f64 = 108.8;
const POS_POWER_COEFF: f64 = -65.0;
const EXPONENT: f64 = 0.2;

/// Retarded time at which the engine switches from adiabatic to GUI.
///
/// `nu` is expected to be validated (`0 < nu < 0.25`).
pub fn u_cut(nu: f64) -> f64 {
    NEG_POWER_COEFF * nu.powf(-EXPONENT) + OFFSET + POS_POWER_COEFF * nu.powf(EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputation_is_bit_identical() {
        for &nu in &[1e-7, 1e-6, 1e-3, 0.1, 0.2499] {
            assert_eq!(u_cut(nu).to_bits(), u_cut(nu).to_bits());
        }
    }

    #[test]
    fn matches_closed_form() {
        let nu: f64 = 1e-6;
        let expected = -101.6 * nu.powf(-0.2) + 108.8 - 65.0 * nu.powf(0.2);
        assert_eq!(u_cut(nu), expected);
        // 10^1.2 ≈ 15.8489, 10^-1.2 ≈ 0.0631
        assert!((u_cut(nu) - (-1505.55)).abs() < 0.05, "u_cut={}", u_cut(nu));
    }

    #[test]
    fn cutoff_moves_later_as_nu_grows() {
        let grid = [1e-7, 1e-5, 1e-3, 1e-2, 0.1, 0.24];
        for w in grid.windows(2) {
            assert!(u_cut(w[0]) < u_cut(w[1]), "nu={} vs {}", w[0], w[1]);
        }
    }
}
