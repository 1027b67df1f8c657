//! Scored-batch export. Rows go to a temp file first and are renamed into
//! place, so a failed run never leaves a half-written output behind.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PipelineError;
use crate::models::{RiskBand, ScoredRecord};

/// Output row. Field order here is the output column order.
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    employee_id: &'a str,
    dept: &'a str,
    tenure_months: f64,
    last_promotion_months: f64,
    engagement_score: f64,
    overtime_hours_month: f64,
    absenteeism_days_month: f64,
    performance_score: f64,
    peer_turnover_rate: f64,
    internal_mobility: u8,
    risk_score: f64,
    risk_band: RiskBand,
    top_driver: &'a str,
}

/// Serialize scored records to `path` in input order.
pub fn export_csv(path: &Path, records: &[ScoredRecord]) -> Result<(), PipelineError> {
    let tmp = tmp_path(path);
    if let Err(source) = write_rows(&tmp, records) {
        let _ = fs::remove_file(&tmp);
        return Err(PipelineError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    fs::rename(&tmp, path).map_err(|io| {
        let _ = fs::remove_file(&tmp);
        PipelineError::Write {
            path: path.to_path_buf(),
            source: csv::Error::from(io),
        }
    })
}

fn write_rows(tmp: &Path, records: &[ScoredRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(tmp)?;
    for scored in records {
        let r = &scored.record;
        writer.serialize(OutputRow {
            employee_id: &r.employee_id,
            dept: &r.dept,
            tenure_months: r.tenure_months,
            last_promotion_months: r.last_promotion_months,
            engagement_score: r.engagement_score,
            overtime_hours_month: r.overtime_hours_month,
            absenteeism_days_month: r.absenteeism_days_month,
            performance_score: r.performance_score,
            peer_turnover_rate: r.peer_turnover_rate,
            internal_mobility: r.internal_mobility,
            risk_score: scored.risk_score,
            risk_band: scored.risk_band,
            top_driver: &scored.top_driver,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, SalaryBand};

    pub const EXPECTED_HEADER: [&str; 13] = [
        "employee_id",
        "dept",
        "tenure_months",
        "last_promotion_months",
        "engagement_score",
        "overtime_hours_month",
        "absenteeism_days_month",
        "performance_score",
        "peer_turnover_rate",
        "internal_mobility",
        "risk_score",
        "risk_band",
        "top_driver",
    ];

    fn scored(id: &str, score: f64, band: RiskBand) -> ScoredRecord {
        ScoredRecord {
            record: EmployeeRecord {
                employee_id: id.to_string(),
                dept: "Finance".to_string(),
                tenure_months: 18.0,
                last_promotion_months: 6.0,
                salary_band: SalaryBand::C,
                manager_span: 5,
                overtime_hours_month: 11.0,
                engagement_score: 64.0,
                absenteeism_days_month: 2.0,
                peer_turnover_rate: 0.2,
                performance_score: 71.0,
                internal_mobility: 1,
            },
            risk_score: score,
            risk_band: band,
            top_driver: "overtime_hours_month".to_string(),
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("retention_guard_{}_{}", std::process::id(), name))
    }

    #[test]
    fn round_trip_preserves_rows_and_order() {
        let path = temp_file("round_trip.csv");
        let records = vec![
            scored("E1002", 0.812, RiskBand::High),
            scored("E1000", 0.12, RiskBand::Low),
            scored("E1001", 0.55, RiskBand::Medium),
        ];
        export_csv(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();
        assert_eq!(header, EXPECTED_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "E1002");
        assert_eq!(&rows[1][0], "E1000");
        assert_eq!(&rows[2][0], "E1001");
        assert_eq!(&rows[0][10], "0.812");
        assert_eq!(&rows[0][11], "High");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unwritable_destination_fails_with_write_error() {
        let path = Path::new("/nonexistent-dir/out.csv");
        let err = export_csv(path, &[scored("E1000", 0.5, RiskBand::Medium)]).unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
    }

    #[test]
    fn failed_export_leaves_no_partial_file() {
        let dir = temp_file("no_partial_dir");
        let path = dir.join("out.csv");
        // Parent dir does not exist, so the temp write itself fails.
        let err = export_csv(&path, &[scored("E1000", 0.5, RiskBand::Low)]).unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
        assert!(!path.exists());
    }
}
