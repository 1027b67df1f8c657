//! Seeded synthetic employee batches for demo runs. No real HR data.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::models::{EmployeeRecord, SalaryBand};

const DEPTS: [&str; 5] = ["HR", "Sales", "Engineering", "Finance", "Ops"];

/// Cumulative weights for bands A/B/C/D (0.2 / 0.4 / 0.3 / 0.1).
const BAND_CUMULATIVE: [(f64, SalaryBand); 4] = [
    (0.2, SalaryBand::A),
    (0.6, SalaryBand::B),
    (0.9, SalaryBand::C),
    (1.0, SalaryBand::D),
];

#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    pub rows: usize,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig { rows: 200, seed: 42 }
    }
}

/// Generate `config.rows` plausible records. Same seed and row count give an
/// identical batch, so demo runs are reproducible.
pub fn generate(config: &SampleConfig) -> Vec<EmployeeRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let overtime_dist = normal(8.0, 6.0);
    let engagement_dist = normal(72.0, 12.0);
    let absenteeism_dist = normal(1.5, 1.0);
    let performance_dist = normal(74.0, 10.0);

    let mut records = Vec::with_capacity(config.rows);
    for idx in 0..config.rows {
        // Power transform skews tenure toward shorter stays.
        let tenure_months = (3.0 + 117.0 * rng.gen::<f64>().powf(1.5)).floor();
        let promo_gap = rng.gen_range(0..60) as f64;
        let last_promotion_months = (tenure_months - promo_gap).max(0.0);

        let band_draw = rng.gen::<f64>();
        let salary_band = BAND_CUMULATIVE
            .iter()
            .find(|(cutoff, _)| band_draw < *cutoff)
            .map(|(_, band)| *band)
            .unwrap_or(SalaryBand::D);

        records.push(EmployeeRecord {
            employee_id: format!("E{}", 1000 + idx),
            dept: DEPTS[rng.gen_range(0..DEPTS.len())].to_string(),
            tenure_months,
            last_promotion_months,
            salary_band,
            manager_span: rng.gen_range(3..15),
            overtime_hours_month: round1(overtime_dist.sample(&mut rng).max(0.0)),
            engagement_score: round1(engagement_dist.sample(&mut rng).clamp(30.0, 98.0)),
            absenteeism_days_month: round1(absenteeism_dist.sample(&mut rng).clamp(0.0, 6.0)),
            peer_turnover_rate: round3(rng.gen_range(0.02..0.35)),
            performance_score: round1(performance_dist.sample(&mut rng).clamp(40.0, 98.0)),
            internal_mobility: u8::from(rng.gen_bool(0.3)),
        });
    }
    records
}

fn normal(mean: f64, std_dev: f64) -> Normal<f64> {
    Normal::new(mean, std_dev).expect("std dev is a positive constant")
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
