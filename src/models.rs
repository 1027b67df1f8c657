use std::fmt;

use serde::{Deserialize, Serialize};

/// Salary band tiers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryBand {
    A,
    B,
    C,
    D,
}

impl SalaryBand {
    pub fn parse(value: &str) -> Option<SalaryBand> {
        match value.trim() {
            "A" => Some(SalaryBand::A),
            "B" => Some(SalaryBand::B),
            "C" => Some(SalaryBand::C),
            "D" => Some(SalaryBand::D),
            _ => None,
        }
    }

    /// Ordinal position scaled to 0..1, used as the model encoding.
    pub fn ordinal(self) -> f64 {
        match self {
            SalaryBand::A => 0.0,
            SalaryBand::B => 1.0 / 3.0,
            SalaryBand::C => 2.0 / 3.0,
            SalaryBand::D => 1.0,
        }
    }
}

impl fmt::Display for SalaryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SalaryBand::A => "A",
            SalaryBand::B => "B",
            SalaryBand::C => "C",
            SalaryBand::D => "D",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
        };
        f.write_str(label)
    }
}

/// One validated employee row. Immutable once built by the validator or the
/// sample generator.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub dept: String,
    pub tenure_months: f64,
    pub last_promotion_months: f64,
    pub salary_band: SalaryBand,
    pub manager_span: u32,
    pub overtime_hours_month: f64,
    pub engagement_score: f64,
    pub absenteeism_days_month: f64,
    pub peer_turnover_rate: f64,
    pub performance_score: f64,
    pub internal_mobility: u8,
}

/// A scored row ready for export. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: EmployeeRecord,
    pub risk_score: f64,
    pub risk_band: RiskBand,
    pub top_driver: String,
}

/// Why a raw row was excluded from scoring.
#[derive(Debug, Clone, Serialize)]
pub struct RowRejection {
    /// 1-based position in the input file, header excluded.
    pub row: usize,
    pub employee_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BandCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Aggregate outcome of one pipeline run. Every rejected row is accounted
/// for here; nothing is dropped silently.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub rows_in: usize,
    pub rows_scored: usize,
    pub rows_rejected: usize,
    pub rejections: Vec<RowRejection>,
    pub band_counts: BandCounts,
    pub train_auc: Option<f64>,
    /// Per-record top drivers aggregated across the batch, most common first.
    pub top_drivers: Vec<DriverCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverCount {
    pub feature: String,
    pub records: usize,
}
