use clap::{Parser, ValueEnum};

use gemmforge::harness::run_verification;
use gemmforge::logging::init_logging;
use gemmforge::provider::{CpuGemmProvider, GemmProvider};
use gemmforge::tensor::MatrixView;
use gemmforge::verify::Verdict;
use gemmforge::{ErrorCategory, VerifyConfig};

#[derive(Parser, Debug)]
#[command(name = "gemmforge", version)]
#[command(about = "Verify an accelerated mixed-precision GEMM against a CPU reference", long_about = None)]
struct Cli {
    /// Rows of op(A) and of the output
    #[arg(short = 'm', long, default_value_t = 128)]
    m: usize,
    /// Columns of op(B) and of the output
    #[arg(short = 'n', long, default_value_t = 128)]
    n: usize,
    /// Inner dimension (columns of op(A), rows of op(B))
    #[arg(short = 'k', long, default_value_t = 128)]
    k: usize,
    /// Scalar multiplying op(A)*op(B)
    #[arg(short = 'a', long, default_value_t = 2.0)]
    alpha: f32,
    /// Scalar multiplying C
    #[arg(short = 'b', long, default_value_t = 3.0)]
    beta: f32,
    /// Transpose operand A
    #[arg(long)]
    transpose_a: bool,
    /// Transpose operand B
    #[arg(long)]
    transpose_b: bool,
    /// Seed for operand generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Tolerance factor (threshold = f32 epsilon * factor)
    #[arg(long, default_value_t = 10.0)]
    tolerance_factor: f64,
    /// Which GEMM provider to verify
    #[arg(long, value_enum, default_value_t = ProviderKind::default())]
    provider: ProviderKind,
    /// Print operands and outputs (small problems only)
    #[arg(long)]
    print_matrices: bool,
    /// Emit the report as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
enum ProviderKind {
    /// rocBLAS device provider (requires the `rocm` build feature)
    #[cfg_attr(feature = "rocm", default)]
    Rocblas,
    /// Host stand-in provider (pipeline self-check)
    #[cfg_attr(not(feature = "rocm"), default)]
    Cpu,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Rocblas => write!(f, "rocblas"),
            ProviderKind::Cpu => write!(f, "cpu"),
        }
    }
}

impl Cli {
    fn to_config(&self) -> VerifyConfig {
        VerifyConfig {
            m: self.m,
            n: self.n,
            k: self.k,
            alpha: self.alpha,
            beta: self.beta,
            trans_a: if self.transpose_a {
                gemmforge::Transpose::Transpose
            } else {
                gemmforge::Transpose::None
            },
            trans_b: if self.transpose_b {
                gemmforge::Transpose::Transpose
            } else {
                gemmforge::Transpose::None
            },
            seed: self.seed,
            tolerance_factor: self.tolerance_factor,
            ..Default::default()
        }
    }
}

fn build_provider(kind: ProviderKind) -> anyhow::Result<Box<dyn GemmProvider>> {
    match kind {
        ProviderKind::Cpu => Ok(Box::new(CpuGemmProvider::new())),
        #[cfg(feature = "rocm")]
        ProviderKind::Rocblas => {
            let provider = gemmforge::RocblasGemmProvider::new()
                .map_err(|e| anyhow::anyhow!("failed to initialize rocBLAS: {}", e))?;
            Ok(Box::new(provider))
        }
        #[cfg(not(feature = "rocm"))]
        ProviderKind::Rocblas => Err(anyhow::anyhow!(
            "rocblas provider requires building with --features rocm"
        )),
    }
}

fn print_matrices(outcome: &gemmforge::VerifyOutcome) {
    let layout = &outcome.layout;
    let storage = |op: &gemmforge::layout::OperandLayout| {
        MatrixView::column_major(op.storage_rows(), op.storage_cols(), op.ld)
    };
    print!("{}", storage(&layout.a).format("matrix A", &outcome.a));
    print!("{}", storage(&layout.b).format("matrix B", &outcome.b));
    print!("{}", storage(&layout.c).format("matrix C", &outcome.c));
    print!(
        "{}",
        MatrixView::column_major(layout.dims.m, layout.dims.n, layout.d.ld)
            .format("device D", &outcome.candidate)
    );
    print!(
        "{}",
        MatrixView::column_major(layout.dims.m, layout.dims.n, layout.d.ld)
            .format("reference D", &outcome.reference)
    );
}

fn main() -> std::process::ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {}", e);
        return std::process::ExitCode::from(2);
    }

    let cli = Cli::parse();
    let config = cli.to_config();

    let provider = match build_provider(cli.provider) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            return std::process::ExitCode::from(2);
        }
    };

    match run_verification(&config, provider.as_ref()) {
        Ok(outcome) => {
            if cli.print_matrices {
                print_matrices(&outcome);
            }
            println!(
                "M, N, K, lda, ldb, ldc, ldd = {}, {}, {}, {}, {}, {}, {}",
                config.m,
                config.n,
                config.k,
                outcome.layout.a.ld,
                outcome.layout.b.ld,
                outcome.layout.c.ld,
                outcome.layout.d.ld
            );
            if cli.json {
                match serde_json::to_string_pretty(&outcome.report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("failed to serialize report: {}", e);
                        return std::process::ExitCode::from(2);
                    }
                }
            } else {
                println!("{}", outcome.report);
            }
            match outcome.report.verdict {
                Verdict::Pass => std::process::ExitCode::SUCCESS,
                Verdict::Fail => std::process::ExitCode::from(1),
            }
        }
        Err(e) => {
            let category = match e.category() {
                ErrorCategory::User => "user error",
                ErrorCategory::Backend => "backend error",
                ErrorCategory::Internal => "internal error",
            };
            eprintln!("{}: {}", category, e);
            std::process::ExitCode::from(2)
        }
    }
}
