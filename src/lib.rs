//! GemmForge - mixed-precision GEMM verification for AMD GPUs
//!
//! Validates an accelerator-computed GEMM (f16 storage, f32 compute) against
//! an independently computed CPU reference under configurable operand
//! transposition, and reports a max-relative-error metric with a PASS/FAIL
//! verdict.

#![allow(clippy::too_many_arguments)] // GEMM entry points mirror BLAS argument surfaces
#![allow(clippy::needless_range_loop)] // Indexed loops are clearer for strided matrix access

pub mod backend;
pub mod config;
pub mod error;
pub mod harness;
pub mod layout;
pub mod logging;
pub mod precision;
pub mod provider;
pub mod reference;
pub mod tensor;
pub mod verify;

pub use config::VerifyConfig;
pub use error::{ErrorCategory, ForgeResult, GemmForgeError};
pub use harness::{run_verification, VerifyOutcome};
pub use layout::{GemmDims, Layout, Transpose};
pub use provider::{CpuGemmProvider, GemmProvider, GemmRequest};
pub use tensor::MatrixView;
pub use verify::{Tolerance, Verdict, VerifyReport};

#[cfg(feature = "rocm")]
pub use backend::RocblasGemmProvider;
