//! Builds tips records from a tokenized tips export

use crate::columns::{HeaderMap, TipsColumns};
use crate::config::ImportConfig;
use crate::departments::Department;
use crate::error::{Error, Result, SourceFile};
use crate::table::{data_rows, Row};
use crate::values::{parse_number, EmployeeId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One employee's pooled tips from the tips export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsRecord {
    pub employee_id: EmployeeId,
    pub dept: Department,
    /// Tips and gratuity after pooling
    pub tips: f64,
}

/// Validate a tips export and convert its data rows
pub fn build_tips_records(rows: &[Row], config: &ImportConfig) -> Result<Vec<TipsRecord>> {
    let Some(header) = rows.first() else {
        info!("tips export is empty");
        return Ok(Vec::new());
    };
    let columns = TipsColumns::resolve(&HeaderMap::from_header(header));

    let records = data_rows(rows, config.max_data_rows)
        .map(|(row_number, row)| build_record(row, row_number, &columns, config))
        .collect::<Result<Vec<_>>>()?;

    info!(records = records.len(), "built tips records");
    Ok(records)
}

fn build_record(
    row: &Row,
    row_number: usize,
    columns: &TipsColumns,
    config: &ImportConfig,
) -> Result<TipsRecord> {
    let raw_id = row.trimmed(columns.employee_id);
    if raw_id.is_empty() {
        return Err(Error::MissingIdentifier {
            file: SourceFile::Tips,
            row: row_number,
        });
    }
    let employee_id = EmployeeId::parse(raw_id).ok_or_else(|| Error::InvalidIdentifier {
        file: SourceFile::Tips,
        row: row_number,
        value: raw_id.to_string(),
    })?;

    let job = row.trimmed(columns.job);
    let dept = config
        .job_titles
        .get(job)
        .ok_or_else(|| Error::UnmappedDepartment {
            file: SourceFile::Tips,
            row: row_number,
            value: job.to_string(),
        })?;

    Ok(TipsRecord {
        employee_id,
        dept,
        tips: parse_number(row.field(columns.pooled_tips)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    const HEADER: &str = "Employee ID,Name,Job,Tips and Gratuity after Pooling\n";

    fn build(csv: &str) -> Result<Vec<TipsRecord>> {
        build_tips_records(&tokenize(csv), &ImportConfig::default())
    }

    #[test]
    fn test_build_records() {
        let records = build(&format!(
            "{HEADER}7,\"Lee, Sam\",Bartender,123.455\n8,Ana,Food Runner,40\n"
        ))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id.number(), 7);
        assert_eq!(records[0].dept, Department::Bartend);
        assert_eq!(records[0].tips, 123.455);
        assert_eq!(records[1].dept, Department::Runner);
    }

    #[test]
    fn test_unparsable_tips_default_to_zero() {
        let records = build(&format!("{HEADER}7,Sam,Server,\n8,Ana,Host,--\n")).unwrap();
        assert_eq!(records[0].tips, 0.0);
        assert_eq!(records[1].tips, 0.0);
    }

    #[test]
    fn test_unmapped_job_title() {
        let err = build(&format!("{HEADER}7,Sam,Server,10\n8,Ana,Sommelier,10\n")).unwrap_err();
        match err {
            Error::UnmappedDepartment { file, row, value } => {
                assert_eq!(file, SourceFile::Tips);
                assert_eq!(row, 3);
                assert_eq!(value, "Sommelier");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_job_title_match_is_exact() {
        let err = build(&format!("{HEADER}7,Sam,server,10\n")).unwrap_err();
        assert!(matches!(err, Error::UnmappedDepartment { row: 2, .. }));
    }

    #[test]
    fn test_missing_identifier() {
        let err = build(&format!("{HEADER}7,Sam,Server,10\n,Ana,Host,5\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingIdentifier {
                file: SourceFile::Tips,
                row: 3
            }
        ));
        assert!(err.to_string().starts_with("[TIPS] Row 3"));
    }

    #[test]
    fn test_fallback_columns() {
        // Unknown headers: id at 0, job at 2, tips at 18
        let mut fields = vec![String::new(); 19];
        fields[0] = "12".into();
        fields[2] = "Steward".into();
        fields[18] = "9.99".into();
        let rows = vec![Row::from(vec!["x"]), Row::new(fields)];

        let records = build_tips_records(&rows, &ImportConfig::default()).unwrap();
        assert_eq!(records[0].employee_id.number(), 12);
        assert_eq!(records[0].dept, Department::Steward);
        assert_eq!(records[0].tips, 9.99);
    }

    #[test]
    fn test_custom_job_titles() {
        let mut config = ImportConfig::default();
        config.job_titles.insert("Barback", Department::Bartend);
        let rows = tokenize(&format!("{HEADER}7,Sam,Barback,10\n"));

        let records = build_tips_records(&rows, &config).unwrap();
        assert_eq!(records[0].dept, Department::Bartend);
    }
}
