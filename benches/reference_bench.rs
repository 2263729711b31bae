//! Reference GEMM benchmark suite
//!
//! Measures the mixed-precision CPU reference across problem sizes and
//! transposition combinations.
//!
//! Run with: `cargo bench --bench reference_bench`

use std::hint::black_box;
use std::time::{Duration, Instant};

use gemmforge::layout::{GemmDims, Layout, Transpose};
use gemmforge::reference::compute_gold;
use gemmforge::tensor::{fill_uniform_int, seeded_rng};
use half::f16;

struct Benchmark {
    name: String,
    iterations: usize,
    warmup_iterations: usize,
}

impl Benchmark {
    fn new(name: &str, iterations: usize) -> Self {
        Benchmark {
            name: name.to_string(),
            iterations,
            warmup_iterations: iterations.min(5),
        }
    }

    fn run_time<F, R>(&self, mut f: F) -> BenchmarkResult
    where
        F: FnMut() -> R,
    {
        for _ in 0..self.warmup_iterations {
            black_box(f());
        }

        let mut durations = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let start = Instant::now();
            black_box(f());
            durations.push(start.elapsed());
        }

        BenchmarkResult {
            name: self.name.clone(),
            iterations: self.iterations,
            durations,
        }
    }
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    durations: Vec<Duration>,
}

impl BenchmarkResult {
    fn report_with_gflops(&self, m: usize, n: usize, k: usize) {
        let total: Duration = self.durations.iter().sum();
        let avg = total / self.iterations as u32;
        let min = *self.durations.iter().min().unwrap();
        let max = *self.durations.iter().max().unwrap();

        println!("\n=== {} ===", self.name);
        println!("Iterations: {}", self.iterations);
        println!("Average: {:.3} ms", avg.as_secs_f64() * 1000.0);
        println!("Min:     {:.3} ms", min.as_secs_f64() * 1000.0);
        println!("Max:     {:.3} ms", max.as_secs_f64() * 1000.0);

        // 2*m*n*k floating point operations (multiply-add)
        let flops = 2.0 * m as f64 * n as f64 * k as f64;
        let gflops = flops / avg.as_secs_f64() / 1e9;
        println!("GFLOPS: {:.2}", gflops);
    }
}

fn bench_reference(m: usize, n: usize, k: usize, trans_a: Transpose, trans_b: Transpose) {
    let layout = Layout::plan(GemmDims::new(m, n, k), trans_a, trans_b)
        .expect("benchmark dimensions are valid");

    let mut rng = seeded_rng(0);
    let mut a = vec![f16::ZERO; layout.a.size];
    let mut b = vec![f16::ZERO; layout.b.size];
    let mut c = vec![f16::ZERO; layout.c.size];
    fill_uniform_int(&mut a, 1, 3, &mut rng);
    fill_uniform_int(&mut b, 1, 3, &mut rng);
    fill_uniform_int(&mut c, 1, 3, &mut rng);
    let mut d = vec![f16::ZERO; layout.d.size];

    let name = format!(
        "reference gemm {}x{}x{} transA={} transB={}",
        m, n, k, trans_a, trans_b
    );
    let result = Benchmark::new(&name, 20).run_time(|| {
        compute_gold(&layout, 2.0, 3.0, &a, &b, &c, &mut d);
        d[0]
    });
    result.report_with_gflops(m, n, k);
}

fn main() {
    println!("Reference GEMM benchmarks");

    for &size in &[64, 128, 256, 512] {
        bench_reference(size, size, size, Transpose::None, Transpose::None);
    }

    bench_reference(256, 256, 256, Transpose::Transpose, Transpose::None);
    bench_reference(256, 256, 256, Transpose::None, Transpose::Transpose);
    bench_reference(512, 128, 2048, Transpose::None, Transpose::None);
}
