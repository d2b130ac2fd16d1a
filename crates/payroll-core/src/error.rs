//! Error types for payroll-core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two input exports a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceFile {
    /// Employee labor/hours export
    Labor,
    /// Employee tips export
    Tips,
}

impl SourceFile {
    /// Tag used at the start of user-facing messages
    pub fn tag(&self) -> &'static str {
        match self {
            SourceFile::Labor => "LABOR",
            SourceFile::Tips => "TIPS",
        }
    }

    /// Name of the column holding the department value in this file
    fn department_column(&self) -> &'static str {
        match self {
            SourceFile::Labor => "job code",
            SourceFile::Tips => "job",
        }
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Errors that can occur in payroll-core
///
/// Validation variants render as the final user-facing message:
/// file tag, 1-based row number, and what to do about it.
#[derive(Debug, Error)]
pub enum Error {
    /// Employee id blank on a data row
    #[error("[{file}] Row {row}: employee id is blank. Fill in the employee id for this row and try again.")]
    MissingIdentifier { file: SourceFile, row: usize },

    /// Employee id present but without leading digits
    ///
    /// Only the leading digits are read, so `"42abc"` is accepted as 42.
    #[error("[{file}] Row {row}: employee id \"{value}\" is not numeric. Correct the employee id for this row and try again.")]
    InvalidIdentifier {
        file: SourceFile,
        row: usize,
        value: String,
    },

    /// Job code or job title missing from the department mapping
    #[error(
        "[{file}] Row {row}: {} \"{value}\" is not mapped to a department. Add it to the department mapping or fix the row, then try again.",
        .file.department_column()
    )]
    UnmappedDepartment {
        file: SourceFile,
        row: usize,
        value: String,
    },

    /// Both exports failed validation
    #[error("{labor}\n{tips}")]
    BothRejected { labor: Box<Error>, tips: Box<Error> },

    /// The join was finished before both exports reported back
    #[error("import not ready: waiting on the {0} export")]
    JoinIncomplete(SourceFile),

    /// A worker building one of the exports panicked
    #[error("worker for the {0} export stopped unexpectedly")]
    WorkerPanicked(SourceFile),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures caused by the content of an input row
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingIdentifier { .. }
                | Error::InvalidIdentifier { .. }
                | Error::UnmappedDepartment { .. }
                | Error::BothRejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_tag_and_row() {
        let err = Error::MissingIdentifier {
            file: SourceFile::Labor,
            row: 3,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[LABOR] Row 3:"));
        assert!(msg.contains("Fill in the employee id"));

        let err = Error::UnmappedDepartment {
            file: SourceFile::Tips,
            row: 7,
            value: "Sommelier".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[TIPS] Row 7:"));
        assert!(msg.contains("job \"Sommelier\""));
    }

    #[test]
    fn test_labor_mentions_job_code() {
        let err = Error::UnmappedDepartment {
            file: SourceFile::Labor,
            row: 2,
            value: "999".to_string(),
        };
        assert!(err.to_string().contains("job code \"999\""));
        assert!(err.is_validation());
    }

    #[test]
    fn test_both_rejected_lists_both() {
        let err = Error::BothRejected {
            labor: Box::new(Error::MissingIdentifier {
                file: SourceFile::Labor,
                row: 2,
            }),
            tips: Box::new(Error::MissingIdentifier {
                file: SourceFile::Tips,
                row: 5,
            }),
        };
        let msg = err.to_string();
        let lines: Vec<&str> = msg.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[LABOR] Row 2"));
        assert!(lines[1].starts_with("[TIPS] Row 5"));
        assert!(err.is_validation());
    }
}
