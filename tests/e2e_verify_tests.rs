//! End-to-end harness tests
//!
//! Runs the full pipeline against provider stand-ins: the scenario from the
//! original sample (M=N=K=8, alpha=0.001, beta=1.0, integer operands in
//! [1,3]) must PASS against a correct provider, a fault-injecting provider
//! must FAIL, and a provider error must abort the run.

use anyhow::Result;
use gemmforge::harness::run_verification;
use gemmforge::layout::Transpose;
use gemmforge::provider::{
    CpuGemmProvider, GemmProvider, GemmRequest, ProviderError, ProviderResult,
};
use gemmforge::verify::Verdict;
use gemmforge::VerifyConfig;
use half::f16;

/// Correct provider that corrupts exactly one output element afterwards.
struct FaultInjectingProvider {
    inner: CpuGemmProvider,
    element: usize,
    relative_offset: f32,
}

impl GemmProvider for FaultInjectingProvider {
    fn name(&self) -> &'static str {
        "fault-injecting"
    }

    fn gemm_f16(
        &self,
        request: &GemmRequest,
        a: &[f16],
        b: &[f16],
        c: &[f16],
        d: &mut [f16],
    ) -> ProviderResult<()> {
        self.inner.gemm_f16(request, a, b, c, d)?;
        let old = d[self.element].to_f32();
        d[self.element] = f16::from_f32(old * (1.0 + self.relative_offset));
        Ok(())
    }
}

/// Provider whose submission always reports a non-success status.
struct BrokenProvider;

impl GemmProvider for BrokenProvider {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn gemm_f16(
        &self,
        _request: &GemmRequest,
        _a: &[f16],
        _b: &[f16],
        _c: &[f16],
        _d: &mut [f16],
    ) -> ProviderResult<()> {
        Err(ProviderError::InvocationFailed(
            "simulated device failure".to_string(),
        ))
    }
}

fn sample_config() -> VerifyConfig {
    VerifyConfig {
        m: 8,
        n: 8,
        k: 8,
        alpha: 0.001,
        beta: 1.0,
        seed: 7,
        ..Default::default()
    }
}

#[test]
fn test_original_sample_scenario_passes() -> Result<()> {
    let outcome = run_verification(&sample_config(), &CpuGemmProvider::new())?;

    assert_eq!(outcome.report.verdict, Verdict::Pass);
    assert!(outcome.report.max_relative_error <= outcome.report.tolerance);

    // Spot-check one element against a hand-rolled triple loop: with
    // alpha = 0.001 and beta = 1.0, D[0,0] = 0.001 * sum + C[0,0].
    let m = 8;
    let mut sum = 0.0f32;
    for kk in 0..8 {
        sum += outcome.a[kk * m].to_f32() * outcome.b[kk].to_f32();
    }
    let expected = f16::from_f32(0.001 * sum + outcome.c[0].to_f32());
    assert_eq!(outcome.reference[0].to_bits(), expected.to_bits());
    Ok(())
}

#[test]
fn test_default_dimensions_pass_all_transpose_combinations() -> Result<()> {
    for (ta, tb) in [
        (Transpose::None, Transpose::None),
        (Transpose::None, Transpose::Transpose),
        (Transpose::Transpose, Transpose::None),
        (Transpose::Transpose, Transpose::Transpose),
    ] {
        let config = VerifyConfig {
            m: 32,
            n: 24,
            k: 48,
            trans_a: ta,
            trans_b: tb,
            ..Default::default()
        };
        let outcome = run_verification(&config, &CpuGemmProvider::new())?;
        assert_eq!(
            outcome.report.verdict,
            Verdict::Pass,
            "transA={} transB={}",
            ta,
            tb
        );
    }
    Ok(())
}

#[test]
fn test_fault_injection_flips_verdict_to_fail() -> Result<()> {
    let provider = FaultInjectingProvider {
        inner: CpuGemmProvider::new(),
        element: 13,
        relative_offset: 0.05,
    };
    let outcome = run_verification(&sample_config(), &provider)?;

    // A mismatch is a normal completion, not an error
    assert_eq!(outcome.report.verdict, Verdict::Fail);
    assert!(outcome.report.max_relative_error > outcome.report.tolerance);
    Ok(())
}

#[test]
fn test_perturbation_below_tolerance_still_passes() -> Result<()> {
    // A sub-epsilon nudge is absorbed by rounding: the stored value is
    // bit-identical to the reference, so the run still passes.
    let provider = FaultInjectingProvider {
        inner: CpuGemmProvider::new(),
        element: 13,
        relative_offset: 1.0e-8,
    };
    let outcome = run_verification(&sample_config(), &provider)?;
    assert_eq!(outcome.report.verdict, Verdict::Pass);
    Ok(())
}

#[test]
fn test_provider_failure_is_fatal() {
    let result = run_verification(&sample_config(), &BrokenProvider);
    let err = result.expect_err("broken provider must abort the run");
    assert_eq!(err.category(), gemmforge::ErrorCategory::Backend);
}

#[test]
fn test_runs_with_same_seed_reproduce_report() -> Result<()> {
    let config = sample_config();
    let first = run_verification(&config, &CpuGemmProvider::new())?;
    let second = run_verification(&config, &CpuGemmProvider::new())?;

    assert_eq!(first.a, second.a);
    assert_eq!(
        first.report.max_relative_error,
        second.report.max_relative_error
    );
    for (x, y) in first.reference.iter().zip(second.reference.iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
    Ok(())
}
