//! Host stand-in provider
//!
//! Computes the device contract on the CPU. Used by the test suite to
//! exercise the harness and verifier without accelerator hardware, and by
//! the CLI as a no-GPU fallback (in which case the verification degenerates
//! to a self-check of the pipeline).

use half::f16;
use tracing::debug;

use crate::provider::{Datatype, GemmProvider, GemmRequest, ProviderError, ProviderResult};
use crate::reference;

/// Deterministic host implementation of the device GEMM contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuGemmProvider;

impl CpuGemmProvider {
    pub fn new() -> Self {
        CpuGemmProvider
    }
}

impl GemmProvider for CpuGemmProvider {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn gemm_f16(
        &self,
        request: &GemmRequest,
        a: &[f16],
        b: &[f16],
        c: &[f16],
        d: &mut [f16],
    ) -> ProviderResult<()> {
        if request.ab_type != Datatype::F16 || request.cd_type != Datatype::F16 {
            return Err(ProviderError::UnsupportedDatatype(format!(
                "cpu provider handles f16 storage only, got {:?}/{:?}",
                request.ab_type, request.cd_type
            )));
        }
        if request.compute_type != Datatype::F32 {
            return Err(ProviderError::UnsupportedDatatype(format!(
                "cpu provider computes in f32 only, got {:?}",
                request.compute_type
            )));
        }
        request.validate_buffers(a, b, c, d)?;

        debug!(
            m = request.dims.m,
            n = request.dims.n,
            k = request.dims.k,
            trans_a = %request.trans_a,
            trans_b = %request.trans_b,
            "cpu provider computing gemm"
        );

        reference::gemm_mixed_precision(
            request.alpha,
            request.beta,
            request.dims,
            a,
            request.stride_a(),
            b,
            request.stride_b(),
            c,
            (1, request.ldc),
            d,
            request.ldd,
        );
        Ok(())
    }
}
