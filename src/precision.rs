//! Storage/compute precision model
//!
//! Operands are held in a narrow *storage* precision (f16) while every
//! multiply-accumulate runs in a wider *compute* precision (f32). Conversions
//! are explicit and total: values are widened on read and narrowed on write,
//! never converted implicitly.

use half::f16;

/// Compute-precision machine epsilon, the basis for verification tolerances.
pub const COMPUTE_EPSILON: f64 = f32::EPSILON as f64;

/// An element type usable as GEMM storage precision.
///
/// `narrow` rounds to nearest-even, matching IEEE 754 default rounding and
/// the `half` crate's f32-to-f16 conversion.
pub trait Element: Copy + Send + Sync + PartialEq + std::fmt::Debug + 'static {
    /// Widen a stored value to compute precision.
    fn widen(self) -> f32;

    /// Narrow a compute-precision value back to storage precision.
    fn narrow(value: f32) -> Self;
}

impl Element for f16 {
    #[inline]
    fn widen(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn narrow(value: f32) -> Self {
        f16::from_f32(value)
    }
}

impl Element for f32 {
    #[inline]
    fn widen(self) -> f32 {
        self
    }

    #[inline]
    fn narrow(value: f32) -> Self {
        value
    }
}
