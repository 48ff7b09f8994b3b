use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use pairsim::{
    build_matrix, sha256_file, write_matrix_to_path, BuildOptions, PhaseTimings, RunReport,
    RunStats, VectorStore,
};

/// Compute an all-pairs cosine-similarity matrix over sparse feature vectors.
#[derive(Parser, Debug)]
#[command(name = "pairsim", version)]
struct Cli {
    /// Feature file: one sparse vector per line, `index:value` tokens separated by spaces
    feature_file: PathBuf,

    /// Output file: N lines of N tab-separated similarity values
    output_file: PathBuf,

    /// Size of the worker pool (default: one thread per core)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Replace non-finite similarities (zero-norm vectors) with 0.0
    #[arg(long)]
    clamp_degenerate: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Suppress progress logging on stderr
    #[arg(long)]
    quiet: bool,
}

fn main() {
    // Usage errors exit with code 1, not clap's default 2.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    if let Err(err) = run(cli) {
        eprintln!("[error] {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to size the worker pool")?;
    }

    let verbose = !cli.quiet;
    let total_start = Instant::now();

    // Step 1: Load and parse the feature vectors (once per line).
    if verbose {
        eprintln!(
            "[load] Reading feature vectors from {}",
            cli.feature_file.display()
        );
    }
    let load_start = Instant::now();
    let store = VectorStore::load(&cli.feature_file)?;
    let load_duration = load_start.elapsed();
    let n = store.len();
    if verbose {
        eprintln!(
            "[load] ✓ {} vectors, {} nonzero entries [{:.2}s]",
            n,
            store.total_nonzeros(),
            load_duration.as_secs_f64()
        );
    }

    // Digest the input before the long compute phase so the report describes
    // the bytes that were actually loaded.
    let feature_sha256 = if cli.report.is_some() {
        Some(sha256_file(&cli.feature_file)?)
    } else {
        None
    };

    // Step 2: Pairwise similarity over the upper triangle, mirrored.
    if verbose {
        eprintln!("[matrix] Computing {}x{} similarity matrix...", n, n);
    }
    let compute_start = Instant::now();
    let options = BuildOptions {
        clamp_degenerate: cli.clamp_degenerate,
        progress: verbose,
    };
    let matrix = build_matrix(&store, &options);
    let compute_duration = compute_start.elapsed();
    if verbose {
        eprintln!(
            "[matrix] ✓ {} kernel invocations [{:.2}s]",
            n * (n + 1) / 2,
            compute_duration.as_secs_f64()
        );
    }

    // Step 3: Serialize the full matrix. The output file is only created now,
    // so earlier failures leave nothing partial behind.
    let write_start = Instant::now();
    write_matrix_to_path(&matrix, &cli.output_file)?;
    let write_duration = write_start.elapsed();
    if verbose {
        eprintln!(
            "[write] ✓ {} [{:.2}s]",
            cli.output_file.display(),
            write_duration.as_secs_f64()
        );
    }

    // Step 4 (optional): JSON run report.
    if let Some(report_path) = &cli.report {
        let report = RunReport::new(
            cli.feature_file.display().to_string(),
            feature_sha256.unwrap_or_default(),
            cli.output_file.display().to_string(),
            RunStats {
                vector_count: n,
                nonzero_entries: store.total_nonzeros(),
                matrix_cells: n * n,
                kernel_invocations: n * (n + 1) / 2,
                non_finite_cells: matrix.non_finite_cells(),
            },
            PhaseTimings {
                load: load_duration.as_secs_f64() * 1000.0,
                compute: compute_duration.as_secs_f64() * 1000.0,
                write: write_duration.as_secs_f64() * 1000.0,
            },
        );
        report.write_to_file(report_path)?;
        if verbose {
            eprintln!("[report] ✓ {}", report_path.display());
        }
    }

    if verbose {
        eprintln!();
        eprintln!("=== Run Statistics ===");
        eprintln!("Vectors:              {}", n);
        eprintln!("Nonzero entries:      {}", store.total_nonzeros());
        eprintln!("Matrix cells:         {}", n * n);
        eprintln!("Kernel invocations:   {}", n * (n + 1) / 2);
        eprintln!("Non-finite cells:     {}", matrix.non_finite_cells());
        eprintln!("Load:                 {:.3}s", load_duration.as_secs_f64());
        eprintln!("Compute:              {:.3}s", compute_duration.as_secs_f64());
        eprintln!("Write:                {:.3}s", write_duration.as_secs_f64());
        eprintln!("Total:                {:.3}s", total_start.elapsed().as_secs_f64());
    }

    Ok(())
}
