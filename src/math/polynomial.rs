//! Dense univariate polynomials.
//!
//! The phase and amplitude models are exported as plain coefficient vectors
//! ordered from the highest degree down to the constant term:
//!
//! ```text
//! p(x) = c[0] x^n + c[1] x^(n-1) + ... + c[n]
//! ```
//!
//! Evaluation uses Horner's rule, which needs `n` multiply-adds and stays
//! well conditioned for the modest degrees used by the fits.

use serde::{Deserialize, Serialize};

/// A fitted polynomial curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    /// Coefficients, highest degree first.
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Build a polynomial from highest-degree-first coefficients.
    pub fn new(coefficients: Vec<f64>) -> Result<Self, String> {
        let poly = Self { coefficients };
        poly.validate()?;
        Ok(poly)
    }

    /// Check the invariants a deserialized polynomial must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("polynomial has no coefficients".to_string());
        }
        if let Some(idx) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(format!("coefficient {idx} is not finite"));
        }
        Ok(())
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate `p(x)`.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }
}
