//! Verification harness
//!
//! Composes the pipeline: plan the layout, generate operands once, run the
//! device provider and the CPU reference over the same logical inputs, then
//! compare. Input buffers are read-only for the whole run; the candidate and
//! reference outputs are disjoint buffers, each written by exactly one
//! producer.

use std::time::Instant;

use half::f16;
use tracing::{debug, info};

use crate::config::VerifyConfig;
use crate::error::ForgeResult;
use crate::layout::{GemmDims, Layout};
use crate::provider::{GemmProvider, GemmRequest};
use crate::reference;
use crate::tensor::{fill_uniform_int, seeded_rng};
use crate::verify::{self, Tolerance, VerifyReport};

/// Everything produced by one verification run. Operand and output buffers
/// are kept so the caller can render them (CLI `--print-matrices`).
#[derive(Debug)]
pub struct VerifyOutcome {
    pub layout: Layout,
    pub a: Vec<f16>,
    pub b: Vec<f16>,
    pub c: Vec<f16>,
    /// Output produced by the device provider.
    pub candidate: Vec<f16>,
    /// Ground-truth output from the CPU reference.
    pub reference: Vec<f16>,
    pub report: VerifyReport,
}

/// Run one full verification: provider vs CPU reference.
///
/// Fatal failures (bad configuration, device allocation, provider status)
/// return an error; a numeric mismatch completes normally with a FAIL
/// verdict in the report.
pub fn run_verification(
    config: &VerifyConfig,
    provider: &dyn GemmProvider,
) -> ForgeResult<VerifyOutcome> {
    config.validate()?;

    let dims = GemmDims::new(config.m, config.n, config.k);
    let layout = Layout::plan(dims, config.trans_a, config.trans_b)?;
    info!(
        m = dims.m,
        n = dims.n,
        k = dims.k,
        lda = layout.a.ld,
        ldb = layout.b.ld,
        ldc = layout.c.ld,
        trans_a = %layout.trans_a,
        trans_b = %layout.trans_b,
        provider = provider.name(),
        "verification run starting"
    );

    // Operands are generated once and read-only from here on. The candidate
    // buffer's initial fill is overwritten by the provider; it is cloned
    // into the reference buffer first so both paths start identically.
    let mut rng = seeded_rng(config.seed);
    let mut a = vec![f16::ZERO; layout.a.size];
    let mut b = vec![f16::ZERO; layout.b.size];
    let mut c = vec![f16::ZERO; layout.c.size];
    let mut candidate = vec![f16::ZERO; layout.d.size];
    fill_uniform_int(&mut a, config.fill_min, config.fill_max, &mut rng);
    fill_uniform_int(&mut b, config.fill_min, config.fill_max, &mut rng);
    fill_uniform_int(&mut c, config.fill_min, config.fill_max, &mut rng);
    fill_uniform_int(&mut candidate, config.fill_min, config.fill_max, &mut rng);
    let mut gold = candidate.clone();

    let request = GemmRequest::from_layout(&layout, config.alpha, config.beta);

    let device_start = Instant::now();
    provider.gemm_f16(&request, &a, &b, &c, &mut candidate)?;
    debug!(
        elapsed_us = device_start.elapsed().as_micros() as u64,
        "provider path complete"
    );

    let reference_start = Instant::now();
    reference::compute_gold(&layout, config.alpha, config.beta, &a, &b, &c, &mut gold);
    debug!(
        elapsed_us = reference_start.elapsed().as_micros() as u64,
        "reference path complete"
    );

    let report = verify::verify(&candidate, &gold, Tolerance::new(config.tolerance_factor))?;
    info!(
        max_relative_error = report.max_relative_error,
        tolerance = report.tolerance,
        verdict = %report.verdict,
        "verification run complete"
    );

    Ok(VerifyOutcome {
        layout,
        a,
        b,
        c,
        candidate,
        reference: gold,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CpuGemmProvider;
    use crate::verify::Verdict;

    #[test]
    fn test_cpu_provider_self_check_passes() {
        let config = VerifyConfig {
            m: 16,
            n: 12,
            k: 9,
            ..Default::default()
        };
        let outcome =
            run_verification(&config, &CpuGemmProvider::new()).expect("run should complete");
        assert_eq!(outcome.report.verdict, Verdict::Pass);
        assert_eq!(outcome.report.max_relative_error, 0.0);
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = VerifyConfig {
            m: 0,
            ..Default::default()
        };
        assert!(run_verification(&config, &CpuGemmProvider::new()).is_err());
    }
}
