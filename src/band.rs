use crate::error::PipelineError;
use crate::models::RiskBand;

/// Fixed band cutoffs. `score < t_low` is Low, `t_low <= score < t_high` is
/// Medium, `score >= t_high` is High. Exact at the boundaries.
#[derive(Debug, Clone, Copy)]
pub struct BandThresholds {
    t_low: f64,
    t_high: f64,
}

impl BandThresholds {
    pub fn new(t_low: f64, t_high: f64) -> Result<Self, PipelineError> {
        if !(0.0..=1.0).contains(&t_low) || !(0.0..=1.0).contains(&t_high) || t_low >= t_high {
            return Err(PipelineError::InvalidThresholds { t_low, t_high });
        }
        Ok(BandThresholds { t_low, t_high })
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        // Shipped defaults; override with --t-low / --t-high.
        BandThresholds { t_low: 0.4, t_high: 0.7 }
    }
}

pub fn band_for(score: f64, thresholds: &BandThresholds) -> RiskBand {
    if score >= thresholds.t_high {
        RiskBand::High
    } else if score >= thresholds.t_low {
        RiskBand::Medium
    } else {
        RiskBand::Low
    }
}
