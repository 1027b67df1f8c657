use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;

use crate::band::{self, BandThresholds};
use crate::error::PipelineError;
use crate::export;
use crate::features;
use crate::labels;
use crate::model::{self, LogisticScorer, Scorer};
use crate::models::{BandCounts, DriverCount, RiskBand, RunSummary, ScoredRecord};
use crate::sample::{self, SampleConfig};
use crate::schema;

/// Everything one run needs, fixed up front. No process-wide state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: Option<PathBuf>,
    pub generate_sample: bool,
    pub output: PathBuf,
    pub sample: SampleConfig,
    pub thresholds: BandThresholds,
}

/// Run the full batch: load or generate, validate, calibrate on synthetic
/// labels, score, band, export. Returns the run summary; the batch itself is
/// dropped once the output file is in place.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let (records, rejections, rows_in) = if config.generate_sample {
        let batch = sample::generate(&config.sample);
        if batch.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        let rows_in = batch.len();
        (batch, Vec::new(), rows_in)
    } else if let Some(path) = &config.input {
        let rows = schema::load_rows(path)?;
        let rows_in = rows.len();
        let (valid, rejected) = schema::validate(&rows)?;
        (valid, rejected, rows_in)
    } else {
        return Err(PipelineError::EmptyInput);
    };

    // Calibration labels are internal; they never reach the output file.
    let calibration_labels: Vec<u8> = records.iter().map(labels::synthesize_label).collect();
    let matrix: Vec<Vec<f64>> = records.iter().map(features::derive).collect();

    let mut scorer = LogisticScorer::new();
    scorer.fit(&matrix, &calibration_labels)?;

    let mut scored = Vec::with_capacity(records.len());
    let mut scores = Vec::with_capacity(records.len());
    let mut band_counts = BandCounts::default();
    let mut driver_tally: HashMap<&'static str, usize> = HashMap::new();

    for (record, feats) in records.into_iter().zip(&matrix) {
        // Round before banding so the exported score and its band can never
        // disagree at a threshold.
        let risk_score = round3(scorer.score(feats)?);
        let contributions = scorer.explain(feats)?;
        let driver = model::top_driver(&contributions)?;
        let risk_band = band::band_for(risk_score, &config.thresholds);

        match risk_band {
            RiskBand::Low => band_counts.low += 1,
            RiskBand::Medium => band_counts.medium += 1,
            RiskBand::High => band_counts.high += 1,
        }
        *driver_tally.entry(driver).or_insert(0) += 1;
        scores.push(risk_score);
        scored.push(ScoredRecord {
            record,
            risk_score,
            risk_band,
            top_driver: driver.to_string(),
        });
    }

    let train_auc = model::train_auc(&scores, &calibration_labels);
    export::export_csv(&config.output, &scored)?;

    // Declaration order first, then stable sort by count, so ties stay in
    // feature order.
    let mut top_drivers: Vec<DriverCount> = features::FEATURE_NAMES
        .iter()
        .filter_map(|name| {
            driver_tally.get(name).map(|&records| DriverCount {
                feature: (*name).to_string(),
                records,
            })
        })
        .collect();
    top_drivers.sort_by(|a, b| b.records.cmp(&a.records));

    Ok(RunSummary {
        generated_at: Utc::now(),
        rows_in,
        rows_scored: scored.len(),
        rows_rejected: rejections.len(),
        rejections,
        band_counts,
        train_auc,
        top_drivers,
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
