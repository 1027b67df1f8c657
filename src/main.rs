use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};

mod band;
mod error;
mod export;
mod features;
mod labels;
mod model;
mod models;
mod pipeline;
mod sample;
mod schema;

use band::BandThresholds;
use pipeline::PipelineConfig;
use sample::SampleConfig;

#[derive(Parser)]
#[command(name = "retention-guard")]
#[command(about = "Attrition risk scoring pipeline for HR batches", long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .args(["input", "generate_sample"])
        .required(true)
        .multiple(false)
))]
struct Cli {
    /// Path to the input CSV with the twelve required columns
    #[arg(long)]
    input: Option<PathBuf>,
    /// Generate a synthetic batch instead of reading a file
    #[arg(long)]
    generate_sample: bool,
    /// Output CSV path
    #[arg(long)]
    output: PathBuf,
    /// Row count for the synthetic batch
    #[arg(long, default_value_t = 200)]
    rows: usize,
    /// Seed for the synthetic batch; same seed, same batch
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Score below this is banded Low
    #[arg(long, default_value_t = 0.4)]
    t_low: f64,
    /// Score at or above this is banded High
    #[arg(long, default_value_t = 0.7)]
    t_high: f64,
    /// Also write the run summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let thresholds = BandThresholds::new(cli.t_low, cli.t_high)?;
    let config = PipelineConfig {
        input: cli.input,
        generate_sample: cli.generate_sample,
        output: cli.output,
        sample: SampleConfig {
            rows: cli.rows,
            seed: cli.seed,
        },
        thresholds,
    };

    let summary = pipeline::run_pipeline(&config).context("pipeline run failed")?;

    println!(
        "Scored {} of {} rows -> {}",
        summary.rows_scored,
        summary.rows_in,
        config.output.display()
    );
    println!(
        "Risk bands: {} low / {} medium / {} high",
        summary.band_counts.low, summary.band_counts.medium, summary.band_counts.high
    );

    if let Some(auc) = summary.train_auc {
        println!("Model AUC (train): {auc:.3}");
    }

    if !summary.top_drivers.is_empty() {
        println!("Top drivers:");
        for driver in summary.top_drivers.iter().take(5) {
            println!("- {}: {} records", driver.feature, driver.records);
        }
    }

    if summary.rows_rejected > 0 {
        println!("Rejected {} rows:", summary.rows_rejected);
        for rejection in &summary.rejections {
            match &rejection.employee_id {
                Some(id) => println!("- row {} ({}): {}", rejection.row, id, rejection.reason),
                None => println!("- row {}: {}", rejection.row, rejection.reason),
            }
        }
    }

    if let Some(path) = cli.summary_json {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        println!("Summary written to {}.", path.display());
    }

    Ok(())
}
