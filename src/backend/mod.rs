//! Accelerator backends
//!
//! Only compiled with the `rocm` feature; everything else in the crate is
//! hardware-independent.

#[cfg(feature = "rocm")]
pub mod rocblas;

#[cfg(feature = "rocm")]
pub use rocblas::RocblasGemmProvider;
