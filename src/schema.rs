use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;
use crate::models::{EmployeeRecord, RowRejection, SalaryBand};

/// One raw input row, every field read as text so a single bad value turns
/// into a per-row rejection reason instead of failing the whole file.
/// Unknown columns are ignored by the reader.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub dept: Option<String>,
    #[serde(default)]
    pub tenure_months: Option<String>,
    #[serde(default)]
    pub last_promotion_months: Option<String>,
    #[serde(default)]
    pub salary_band: Option<String>,
    #[serde(default)]
    pub manager_span: Option<String>,
    #[serde(default)]
    pub overtime_hours_month: Option<String>,
    #[serde(default)]
    pub engagement_score: Option<String>,
    #[serde(default)]
    pub absenteeism_days_month: Option<String>,
    #[serde(default)]
    pub peer_turnover_rate: Option<String>,
    #[serde(default)]
    pub performance_score: Option<String>,
    #[serde(default)]
    pub internal_mobility: Option<String>,
}

pub fn load_rows(path: &Path) -> Result<Vec<RawRow>, PipelineError> {
    // Flexible so a ragged row surfaces as a per-row validation failure
    // (missing fields) instead of aborting the whole run.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawRow>() {
        let row = result.map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Partition raw rows into validated records and rejections. Fails only when
/// there is nothing left to score.
pub fn validate(rows: &[RawRow]) -> Result<(Vec<EmployeeRecord>, Vec<RowRejection>), PipelineError> {
    if rows.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (idx, row) in rows.iter().enumerate() {
        match parse_row(row, &mut seen_ids) {
            Ok(record) => valid.push(record),
            Err(reason) => rejected.push(RowRejection {
                row: idx + 1,
                employee_id: row.employee_id.clone().filter(|id| !id.trim().is_empty()),
                reason,
            }),
        }
    }

    if valid.is_empty() {
        return Err(PipelineError::AllRowsRejected(rows.len()));
    }

    Ok((valid, rejected))
}

fn parse_row(row: &RawRow, seen_ids: &mut HashSet<String>) -> Result<EmployeeRecord, String> {
    let employee_id = text(&row.employee_id, "employee_id")?.to_string();
    if !seen_ids.insert(employee_id.clone()) {
        return Err(format!("duplicate employee_id {employee_id}"));
    }

    let dept = text(&row.dept, "dept")?.to_string();
    let salary_raw = text(&row.salary_band, "salary_band")?;
    let salary_band = SalaryBand::parse(salary_raw)
        .ok_or_else(|| format!("salary_band must be A, B, C or D, got {salary_raw}"))?;

    let tenure_months = non_negative(&row.tenure_months, "tenure_months")?;
    let last_promotion_months = non_negative(&row.last_promotion_months, "last_promotion_months")?;
    let overtime_hours_month = non_negative(&row.overtime_hours_month, "overtime_hours_month")?;
    let absenteeism_days_month = non_negative(&row.absenteeism_days_month, "absenteeism_days_month")?;
    let engagement_score = bounded(&row.engagement_score, "engagement_score", 0.0, 100.0)?;
    let performance_score = bounded(&row.performance_score, "performance_score", 0.0, 100.0)?;
    let peer_turnover_rate = bounded(&row.peer_turnover_rate, "peer_turnover_rate", 0.0, 1.0)?;

    let manager_span = text(&row.manager_span, "manager_span")?
        .parse::<u32>()
        .map_err(|_| "manager_span must be a non-negative integer".to_string())?;

    let internal_mobility = match text(&row.internal_mobility, "internal_mobility")? {
        "0" => 0,
        "1" => 1,
        other => return Err(format!("internal_mobility must be 0 or 1, got {other}")),
    };

    Ok(EmployeeRecord {
        employee_id,
        dept,
        tenure_months,
        last_promotion_months,
        salary_band,
        manager_span,
        overtime_hours_month,
        engagement_score,
        absenteeism_days_month,
        peer_turnover_rate,
        performance_score,
        internal_mobility,
    })
}

fn text<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("missing required field {name}")),
    }
}

fn number(value: &Option<String>, name: &str) -> Result<f64, String> {
    let raw = text(value, name)?;
    let parsed = raw
        .parse::<f64>()
        .map_err(|_| format!("{name} must be numeric, got {raw}"))?;
    // "NaN" and "inf" parse as f64 but would sail through the range checks
    // and poison every score in the batch.
    if !parsed.is_finite() {
        return Err(format!("{name} must be a finite number, got {raw}"));
    }
    Ok(parsed)
}

fn non_negative(value: &Option<String>, name: &str) -> Result<f64, String> {
    let parsed = number(value, name)?;
    if parsed < 0.0 {
        return Err(format!("{name} must be non-negative, got {parsed}"));
    }
    Ok(parsed)
}

fn bounded(value: &Option<String>, name: &str, lo: f64, hi: f64) -> Result<f64, String> {
    let parsed = number(value, name)?;
    if parsed < lo || parsed > hi {
        return Err(format!("{name} must be between {lo} and {hi}, got {parsed}"));
    }
    Ok(parsed)
}
