//! HIP/rocBLAS error types

use thiserror::Error;

/// Backend error types
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("rocBLAS initialization failed: status {0}")]
    InitializationFailed(i32),
    #[error("device memory allocation failed: {0}")]
    MemoryAllocationFailed(String),
    #[error("device memory copy failed: {0}")]
    MemoryCopyFailed(String),
    #[error("rocBLAS call failed: {call} returned status {status}")]
    RocblasCallFailed { call: &'static str, status: i32 },
}

/// Backend result type
pub type BackendResult<T> = Result<T, BackendError>;
