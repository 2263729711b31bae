//! Device compute providers
//!
//! The accelerated GEMM is an injectable black box behind the
//! [`GemmProvider`] trait: the harness and verifier only depend on its
//! numeric contract (D = alpha * op(A) * op(B) + beta * C in the stated
//! compute precision), so they can be exercised against a deterministic
//! host stand-in without accelerator hardware.

pub mod cpu;

pub use cpu::CpuGemmProvider;

use half::f16;
use serde::Serialize;
use thiserror::Error;

use crate::layout::{GemmDims, Layout, Transpose};

/// Provider error types. All of these are fatal to the run; a numeric
/// mismatch is never reported through this channel.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("invalid GEMM request: {0}")]
    InvalidRequest(String),
    #[error("device memory allocation failed: {0}")]
    AllocationFailed(String),
    #[error("provider invocation failed: {0}")]
    InvocationFailed(String),
    #[error("unsupported datatype combination: {0}")]
    UnsupportedDatatype(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Numeric precision tag carried alongside raw operand buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Datatype {
    F16,
    F32,
}

/// Algorithm selector forwarded to the device library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GemmAlgo {
    #[default]
    Standard,
}

/// Full argument surface of one device GEMM invocation, mirroring the
/// extended-GEMM entry points of accelerator BLAS libraries.
#[derive(Debug, Clone, Serialize)]
pub struct GemmRequest {
    pub trans_a: Transpose,
    pub trans_b: Transpose,
    pub dims: GemmDims,
    pub alpha: f32,
    pub beta: f32,
    pub lda: usize,
    pub ldb: usize,
    pub ldc: usize,
    pub ldd: usize,
    pub ab_type: Datatype,
    pub cd_type: Datatype,
    pub compute_type: Datatype,
    pub algo: GemmAlgo,
    pub solution_index: i32,
    pub flags: u32,
}

impl GemmRequest {
    /// Build the standard f16-storage / f32-compute request for a planned
    /// layout.
    pub fn from_layout(layout: &Layout, alpha: f32, beta: f32) -> Self {
        GemmRequest {
            trans_a: layout.trans_a,
            trans_b: layout.trans_b,
            dims: layout.dims,
            alpha,
            beta,
            lda: layout.a.ld,
            ldb: layout.b.ld,
            ldc: layout.c.ld,
            ldd: layout.d.ld,
            ab_type: Datatype::F16,
            cd_type: Datatype::F16,
            compute_type: Datatype::F32,
            algo: GemmAlgo::Standard,
            solution_index: 0,
            flags: 0,
        }
    }

    /// Stride pair for operand A derived from its transposition flag.
    pub fn stride_a(&self) -> (usize, usize) {
        match self.trans_a {
            Transpose::None => (1, self.lda),
            Transpose::Transpose => (self.lda, 1),
        }
    }

    /// Stride pair for operand B derived from its transposition flag.
    pub fn stride_b(&self) -> (usize, usize) {
        match self.trans_b {
            Transpose::None => (1, self.ldb),
            Transpose::Transpose => (self.ldb, 1),
        }
    }

    /// Expected buffer sizes (A, B, C, D) in elements.
    pub fn buffer_sizes(&self) -> (usize, usize, usize, usize) {
        let GemmDims { m, n, k } = self.dims;
        let size_a = match self.trans_a {
            Transpose::None => k * self.lda,
            Transpose::Transpose => m * self.lda,
        };
        let size_b = match self.trans_b {
            Transpose::None => n * self.ldb,
            Transpose::Transpose => k * self.ldb,
        };
        (size_a, size_b, n * self.ldc, n * self.ldd)
    }

    /// Reject requests whose buffers cannot hold the described operands.
    pub fn validate_buffers(
        &self,
        a: &[f16],
        b: &[f16],
        c: &[f16],
        d: &[f16],
    ) -> ProviderResult<()> {
        let (size_a, size_b, size_c, size_d) = self.buffer_sizes();
        for (name, expected, actual) in [
            ("A", size_a, a.len()),
            ("B", size_b, b.len()),
            ("C", size_c, c.len()),
            ("D", size_d, d.len()),
        ] {
            if actual != expected {
                return Err(ProviderError::InvalidRequest(format!(
                    "buffer {} size mismatch: expected {} elements, have {}",
                    name, expected, actual
                )));
            }
        }
        Ok(())
    }
}

/// A device compute capability: fill `d` with
/// alpha * op(A) * op(B) + beta * C per the request.
///
/// Implementations own their device memory and synchronization; when
/// `gemm_f16` returns, `d` holds the completed result (the readback is the
/// single blocking point of the pipeline).
pub trait GemmProvider {
    /// Human-readable provider name for logs and reports.
    fn name(&self) -> &'static str;

    fn gemm_f16(
        &self,
        request: &GemmRequest,
        a: &[f16],
        b: &[f16],
        c: &[f16],
        d: &mut [f16],
    ) -> ProviderResult<()>;
}
