use plan_bench::execution::ReplayAdapter;
use plan_bench::{run_comparison, BenchConfig, ExecutionAdapter, HintSpec, Pipeline};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plan-bench")]
#[command(about = "Compare the automatically chosen query plan against a hinted one")]
#[command(version)]
struct Args {
    /// Aggregation pipeline to benchmark (JSON array of stages)
    #[arg(short, long, default_value = "demos/mflix_pipeline.json")]
    pipeline: PathBuf,

    /// Recorded explain output to replay
    #[arg(short, long, default_value = "demos/mflix_recording.json")]
    recording: PathBuf,

    /// JSON configuration file (PLAN_BENCH_* variables still apply on top)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Warm-up and sampled runs per pass
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Index name that selects the narrow hint
    #[arg(long)]
    canonical_index: Option<String>,

    /// Hint used when the canonical index was chosen, e.g. "countries:1,released:1"
    #[arg(long)]
    narrow_hint: Option<HintSpec>,

    /// Hint used otherwise, e.g. "countries:1,rated:1,released:1"
    #[arg(long)]
    wide_hint: Option<HintSpec>,

    /// Print the comparison as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<BenchConfig> {
    let base = match &args.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    let mut config = base.with_env_overrides()?;

    if let Some(samples) = args.samples {
        config.sample_count = samples;
    }
    if let Some(name) = &args.canonical_index {
        config.hint_policy.canonical_index_name = name.clone();
    }
    if let Some(hint) = &args.narrow_hint {
        config.hint_policy.narrow_hint = hint.clone();
    }
    if let Some(hint) = &args.wide_hint {
        config.hint_policy.wide_hint = hint.clone();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let pipeline: Pipeline = serde_json::from_str(
        &std::fs::read_to_string(&args.pipeline)
            .with_context(|| format!("reading pipeline {}", args.pipeline.display()))?,
    )
    .with_context(|| format!("parsing pipeline {}", args.pipeline.display()))?;

    let adapter: Arc<dyn ExecutionAdapter> = Arc::new(ReplayAdapter::load(&args.recording)?);
    info!(
        pipeline = %args.pipeline.display(),
        stages = pipeline.stages.len(),
        adapter = adapter.name(),
        "benchmarking pipeline"
    );

    let comparison = run_comparison(&pipeline, adapter, &config).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", comparison);
    }

    Ok(())
}
