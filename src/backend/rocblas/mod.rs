//! rocBLAS device provider
//!
//! Thin hand-rolled bindings to HIP and rocBLAS plus RAII wrappers, exposing
//! the accelerated GEMM through the [`GemmProvider`](crate::provider::GemmProvider)
//! trait. The `rocblas_gemm_ex` submission is asynchronous; the provider's
//! device-to-host readback of D is the single blocking point.

pub mod error;
pub mod ffi;
pub mod handle;
pub mod memory;
pub mod provider;

pub use error::{BackendError, BackendResult};
pub use handle::RocblasHandle;
pub use memory::DeviceBuffer;
pub use provider::RocblasGemmProvider;
