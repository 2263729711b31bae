//! Unified error handling
//!
//! Consolidates the per-module error types into a single crate-level error
//! with a coarse category, used by the CLI to choose exit codes and
//! messages. Fatal failures (allocation, provider status) surface through
//! this type; a FAIL verdict does not — that is a normal run outcome.

use thiserror::Error;

use crate::config::ConfigError;
use crate::layout::LayoutError;
use crate::provider::ProviderError;
use crate::verify::VerifyError;

/// Unified error type for gemmforge
#[derive(Error, Debug)]
pub enum GemmForgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Coarse error categorization for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input from the operator; actionable by adjusting arguments.
    User,
    /// Device/provider environment failure.
    Backend,
    /// A bug in this tool.
    Internal,
}

impl GemmForgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GemmForgeError::Config(_) | GemmForgeError::Layout(_) => ErrorCategory::User,
            GemmForgeError::Provider(ProviderError::InvalidRequest(_)) => ErrorCategory::Internal,
            GemmForgeError::Provider(_) => ErrorCategory::Backend,
            GemmForgeError::Verify(_) => ErrorCategory::Internal,
        }
    }
}

/// Crate-wide result type
pub type ForgeResult<T> = Result<T, GemmForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_user_errors() {
        let err: GemmForgeError = ConfigError::InvalidDimensions { m: 0, n: 1, k: 1 }.into();
        assert_eq!(err.category(), ErrorCategory::User);
    }

    #[test]
    fn test_provider_failures_are_backend_errors() {
        let err: GemmForgeError =
            ProviderError::AllocationFailed("out of device memory".into()).into();
        assert_eq!(err.category(), ErrorCategory::Backend);
    }

    #[test]
    fn test_shape_mismatch_is_internal() {
        let err: GemmForgeError = VerifyError::ShapeMismatch {
            candidate: 1,
            reference: 2,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
