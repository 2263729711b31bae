//! Result verification
//!
//! Compares a candidate output from the device provider against the CPU
//! reference using a max-relative-error metric, then applies a tolerance
//! policy to produce a PASS/FAIL verdict. The metric is always reported,
//! whatever the verdict; a FAIL is the tool doing its job, not an error.

use serde::Serialize;
use thiserror::Error;

use crate::precision::{Element, COMPUTE_EPSILON};

/// Floor applied to the reference magnitude in the relative-error
/// denominator, guarding against division by near-zero reference values.
/// One compute-precision machine epsilon: below this magnitude the
/// comparison degrades gracefully toward an absolute-error check.
pub const RELATIVE_ERROR_FLOOR: f64 = COMPUTE_EPSILON;

/// Default multiplier applied to machine epsilon to set the tolerance.
pub const DEFAULT_TOLERANCE_FACTOR: f64 = 10.0;

/// Verification error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("shape mismatch: candidate has {candidate} elements, reference has {reference}")]
    ShapeMismatch { candidate: usize, reference: usize },
}

/// Pass/fail verdict of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Tolerance policy: threshold = machine-epsilon(compute precision) * factor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tolerance {
    pub factor: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            factor: DEFAULT_TOLERANCE_FACTOR,
        }
    }
}

impl Tolerance {
    pub fn new(factor: f64) -> Self {
        Tolerance { factor }
    }

    /// Maximum relative error accepted as PASS.
    pub fn threshold(&self) -> f64 {
        COMPUTE_EPSILON * self.factor
    }
}

/// Outcome of comparing a candidate output against the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyReport {
    pub max_relative_error: f64,
    pub tolerance: f64,
    pub verdict: Verdict,
}

impl std::fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: max. relative err. = {:e} (tolerance {:e})",
            self.verdict, self.max_relative_error, self.tolerance
        )
    }
}

/// Max over all elements of |candidate - reference| / max(|reference|, floor),
/// evaluated in f64 after widening both sides to compute precision.
pub fn max_relative_error<E: Element>(
    candidate: &[E],
    reference: &[E],
) -> Result<f64, VerifyError> {
    if candidate.len() != reference.len() {
        return Err(VerifyError::ShapeMismatch {
            candidate: candidate.len(),
            reference: reference.len(),
        });
    }

    let mut max_err = 0.0f64;
    for (&cand, &gold) in candidate.iter().zip(reference.iter()) {
        let cand = cand.widen() as f64;
        let gold = gold.widen() as f64;
        let denom = gold.abs().max(RELATIVE_ERROR_FLOOR);
        let err = (cand - gold).abs() / denom;
        if err > max_err {
            max_err = err;
        }
    }
    Ok(max_err)
}

/// Compute the metric and apply the tolerance policy.
pub fn verify<E: Element>(
    candidate: &[E],
    reference: &[E],
    tolerance: Tolerance,
) -> Result<VerifyReport, VerifyError> {
    let max_relative_error = max_relative_error(candidate, reference)?;
    let threshold = tolerance.threshold();
    let verdict = if max_relative_error <= threshold {
        Verdict::Pass
    } else {
        Verdict::Fail
    };
    Ok(VerifyReport {
        max_relative_error,
        tolerance: threshold,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    fn f16s(values: &[f32]) -> Vec<f16> {
        values.iter().map(|&v| f16::from_f32(v)).collect()
    }

    #[test]
    fn test_identical_inputs_pass_with_zero_error() {
        let gold = f16s(&[1.0, 2.0, 3.0, 4.0]);
        let report = verify(&gold, &gold, Tolerance::default()).expect("same shape");
        assert_eq!(report.max_relative_error, 0.0);
        assert_eq!(report.verdict, Verdict::Pass);
    }

    #[test]
    fn test_single_deviating_element_fails() {
        let gold = f16s(&[100.0, 200.0, 300.0]);
        let mut cand = gold.clone();
        cand[1] = f16::from_f32(210.0); // 5% relative error, far above tolerance
        let report = verify(&cand, &gold, Tolerance::default()).expect("same shape");
        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report.max_relative_error > 0.04);
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let gold = f16s(&[1.0, 2.0]);
        let cand = f16s(&[1.0]);
        let result = verify(&cand, &gold, Tolerance::default());
        assert_eq!(
            result,
            Err(VerifyError::ShapeMismatch {
                candidate: 1,
                reference: 2
            })
        );
    }

    #[test]
    fn test_near_zero_reference_uses_floor() {
        // Reference is exactly zero; without the floor this would divide
        // by zero. With the floor the metric is finite.
        let gold = vec![0.0f32];
        let cand = vec![1.0e-7f32];
        let err = max_relative_error(&cand, &gold).expect("same shape");
        assert!(err.is_finite());
        assert!(err > 0.0);
    }

    #[test]
    fn test_verdict_flips_exactly_at_threshold() {
        let tolerance = Tolerance::default();
        let threshold = tolerance.threshold();
        let gold = vec![1.0f32];

        // Relative error exactly at the threshold still passes
        let at = vec![(1.0 + threshold) as f32];
        let report = verify(&at, &gold, tolerance).expect("same shape");
        assert_eq!(report.verdict, Verdict::Pass);

        // Just above the threshold fails
        let above = vec![(1.0 + threshold * 4.0) as f32];
        let report = verify(&above, &gold, tolerance).expect("same shape");
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn test_report_display_matches_verdict() {
        let gold = f16s(&[1.0]);
        let report = verify(&gold, &gold, Tolerance::default()).expect("same shape");
        let line = report.to_string();
        assert!(line.starts_with("PASS: max. relative err. = "));
    }
}
