use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures. Row-level schema problems are not errors in this
/// sense; they become `RowRejection` entries in the run summary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no rows to process")]
    EmptyInput,

    #[error("all {0} input rows were rejected during validation")]
    AllRowsRejected(usize),

    #[error("feature vector has {got} values, model expects {expected}")]
    FeatureShape { expected: usize, got: usize },

    #[error("failed to read input {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write output {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid band thresholds: need 0 <= t_low < t_high <= 1, got {t_low} / {t_high}")]
    InvalidThresholds { t_low: f64, t_high: f64 },

    #[error("model must be fitted before scoring")]
    ModelNotFitted,
}
