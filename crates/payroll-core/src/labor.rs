//! Builds hours records from a tokenized labor export

use crate::columns::{HeaderMap, LaborColumns};
use crate::config::ImportConfig;
use crate::departments::Department;
use crate::error::{Error, Result, SourceFile};
use crate::table::{data_rows, Row};
use crate::values::{parse_number, EmployeeId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One employee's hours from the labor export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursRecord {
    pub employee_id: EmployeeId,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub dept: Department,
    pub normal_rate: f64,
}

/// Validate a labor export and convert its data rows
///
/// Stops at the first invalid row; nothing is returned for the file in
/// that case. Unparsable hours and rates count as 0.
pub fn build_hours_records(rows: &[Row], config: &ImportConfig) -> Result<Vec<HoursRecord>> {
    let Some(header) = rows.first() else {
        info!("labor export is empty");
        return Ok(Vec::new());
    };
    let columns = LaborColumns::resolve(&HeaderMap::from_header(header));

    let mut records = Vec::new();
    for (row_number, row) in data_rows(rows, config.max_data_rows) {
        records.push(build_record(row, row_number, &columns, config)?);
    }

    info!(records = records.len(), "built hours records");
    Ok(records)
}

fn build_record(
    row: &Row,
    row_number: usize,
    columns: &LaborColumns,
    config: &ImportConfig,
) -> Result<HoursRecord> {
    let raw_id = row.trimmed(columns.employee_id);
    if raw_id.is_empty() {
        return Err(Error::MissingIdentifier {
            file: SourceFile::Labor,
            row: row_number,
        });
    }
    let employee_id = EmployeeId::parse(raw_id).ok_or_else(|| Error::InvalidIdentifier {
        file: SourceFile::Labor,
        row: row_number,
        value: raw_id.to_string(),
    })?;

    let job_code = row.trimmed(columns.job_code);
    let dept = config
        .job_codes
        .get(job_code)
        .ok_or_else(|| Error::UnmappedDepartment {
            file: SourceFile::Labor,
            row: row_number,
            value: job_code.to_string(),
        })?;

    Ok(HoursRecord {
        employee_id,
        regular_hours: parse_number(row.field(columns.regular_hours)),
        overtime_hours: parse_number(row.field(columns.overtime_hours)),
        dept,
        normal_rate: parse_number(row.field(columns.normal_rate)),
    })
}
