//! Verification run configuration

use serde::Serialize;
use thiserror::Error;

use crate::layout::Transpose;
use crate::verify::DEFAULT_TOLERANCE_FACTOR;

/// Configuration error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid dimensions: m={m}, n={n}, k={k} (all must be positive)")]
    InvalidDimensions { m: usize, n: usize, k: usize },
    #[error("scalar {name} is not finite: {value}")]
    NonFiniteScalar { name: &'static str, value: f32 },
    #[error("invalid fill range: [{min}, {max}]")]
    InvalidFillRange { min: i32, max: i32 },
    #[error("tolerance factor must be positive, got {0}")]
    InvalidToleranceFactor(f64),
}

/// Parameters of one verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyConfig {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub alpha: f32,
    pub beta: f32,
    pub trans_a: Transpose,
    pub trans_b: Transpose,
    /// Seed for operand generation; identical seeds reproduce identical runs.
    pub seed: u64,
    /// Operands are filled with uniform integers from this inclusive range.
    pub fill_min: i32,
    pub fill_max: i32,
    pub tolerance_factor: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        VerifyConfig {
            m: 128,
            n: 128,
            k: 128,
            alpha: 2.0,
            beta: 3.0,
            trans_a: Transpose::None,
            trans_b: Transpose::None,
            seed: 0,
            fill_min: 1,
            fill_max: 3,
            tolerance_factor: DEFAULT_TOLERANCE_FACTOR,
        }
    }
}

impl VerifyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.m == 0 || self.n == 0 || self.k == 0 {
            return Err(ConfigError::InvalidDimensions {
                m: self.m,
                n: self.n,
                k: self.k,
            });
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteScalar { name, value });
            }
        }
        if self.fill_min > self.fill_max {
            return Err(ConfigError::InvalidFillRange {
                min: self.fill_min,
                max: self.fill_max,
            });
        }
        if !self.tolerance_factor.is_finite() || self.tolerance_factor <= 0.0 {
            return Err(ConfigError::InvalidToleranceFactor(self.tolerance_factor));
        }
        Ok(())
    }
}
