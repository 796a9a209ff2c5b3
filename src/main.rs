use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use prediction_bench::{artifact, bench, config, BenchConfig, HttpClient, ResultWriter, Strategy};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source files to edit, in order
    #[arg(default_values = ["fixtures/sample_module.py", "fixtures/sample_module_2.py"])]
    artifacts: Vec<PathBuf>,

    /// Edit instruction sent with both strategies (defaults to the fixture edit)
    #[arg(long)]
    instruction: Option<String>,

    /// Completion model to target (overrides PREDBENCH_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Chat completions endpoint URL (overrides PREDBENCH_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory the per-strategy outputs are written to
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Request timeout in seconds (overrides PREDBENCH_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut bench_config = BenchConfig::default();
    if let Some(model) = args.model {
        bench_config.model = model;
    }
    if let Some(endpoint) = args.endpoint {
        bench_config.endpoint = endpoint;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        bench_config.timeout_secs = timeout_secs;
    }
    let instruction = args
        .instruction
        .unwrap_or_else(|| config::DEFAULT_INSTRUCTION.to_string());

    // Snapshot the artifacts before any network traffic; a missing path
    // aborts here, with no request built or sent.
    let artifacts =
        artifact::load_all(&args.artifacts).context("Failed to load source artifacts")?;
    info!(
        count = artifacts.len(),
        model = %bench_config.model,
        endpoint = %bench_config.endpoint,
        "Benchmark starting"
    );

    let client = HttpClient::new(bench_config.client_config())
        .context("Failed to build completion client")?;

    let run = bench::run(&client, &bench_config.model, &artifacts, &instruction)
        .await
        .context("Benchmark run failed")?;

    let writer = ResultWriter::new(&args.out_dir);
    let inline_path = writer.persist(Strategy::Inline, &run.inline.output_text)?;
    let hinted_path = writer.persist(Strategy::Hinted, &run.hinted.output_text)?;
    info!(
        inline = %inline_path.display(),
        hinted = %hinted_path.display(),
        "Wrote outputs; diff them to check the edits are equivalent"
    );

    println!("{}", bench::format_summary(&run));

    Ok(())
}
