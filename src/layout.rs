//! Layout planning for GEMM operands
//!
//! Maps logical transposition choices to physical storage strides. The plan
//! is resolved once per run; the multiply loops index through the resulting
//! stride pairs and stay branch-free.
//!
//! All storage is column-major in the BLAS sense: for an untransposed
//! operand the row index varies fastest (stride 1) and the leading dimension
//! is the distance between consecutive columns.

use serde::Serialize;
use thiserror::Error;

/// Layout planning error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid dimensions: m={m}, n={n}, k={k} (all must be positive)")]
    InvalidDimensions { m: usize, n: usize, k: usize },
}

/// Per-operand transposition flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Transpose {
    /// op(X) = X
    #[default]
    None,
    /// op(X) = X^T
    Transpose,
}

impl std::fmt::Display for Transpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transpose::None => write!(f, "N"),
            Transpose::Transpose => write!(f, "T"),
        }
    }
}

/// Logical GEMM problem dimensions: A is M×K, B is K×N, C/D are M×N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GemmDims {
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

impl GemmDims {
    pub fn new(m: usize, n: usize, k: usize) -> Self {
        GemmDims { m, n, k }
    }
}

/// Physical layout of one operand's backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperandLayout {
    /// Leading dimension: distance in elements between consecutive columns
    /// of the stored matrix.
    pub ld: usize,
    /// Stride along the first logical axis (rows of op(X)).
    pub stride1: usize,
    /// Stride along the second logical axis (columns of op(X)).
    pub stride2: usize,
    /// Total buffer size in elements.
    pub size: usize,
}

impl OperandLayout {
    /// Rows of the physical storage (always the leading dimension).
    pub fn storage_rows(&self) -> usize {
        self.ld
    }

    /// Columns of the physical storage.
    pub fn storage_cols(&self) -> usize {
        self.size / self.ld
    }
}

/// Complete layout plan for one GEMM verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub dims: GemmDims,
    pub trans_a: Transpose,
    pub trans_b: Transpose,
    pub a: OperandLayout,
    pub b: OperandLayout,
    pub c: OperandLayout,
    pub d: OperandLayout,
}

impl Layout {
    /// Derive leading dimensions, strides, and buffer sizes from the logical
    /// dimensions and transposition flags.
    ///
    /// Pure function of its inputs. The output (C/D) side is never
    /// transposed: ldc = ldd = M unconditionally.
    pub fn plan(
        dims: GemmDims,
        trans_a: Transpose,
        trans_b: Transpose,
    ) -> Result<Self, LayoutError> {
        let GemmDims { m, n, k } = dims;
        if m == 0 || n == 0 || k == 0 {
            return Err(LayoutError::InvalidDimensions { m, n, k });
        }

        let a = match trans_a {
            Transpose::None => OperandLayout {
                ld: m,
                stride1: 1,
                stride2: m,
                size: k * m,
            },
            Transpose::Transpose => OperandLayout {
                ld: k,
                stride1: k,
                stride2: 1,
                size: m * k,
            },
        };

        // B is symmetric with K and N swapped relative to A
        let b = match trans_b {
            Transpose::None => OperandLayout {
                ld: k,
                stride1: 1,
                stride2: k,
                size: n * k,
            },
            Transpose::Transpose => OperandLayout {
                ld: n,
                stride1: n,
                stride2: 1,
                size: k * n,
            },
        };

        let c = OperandLayout {
            ld: m,
            stride1: 1,
            stride2: m,
            size: n * m,
        };
        let d = c;

        Ok(Layout {
            dims,
            trans_a,
            trans_b,
            a,
            b,
            c,
            d,
        })
    }
}
