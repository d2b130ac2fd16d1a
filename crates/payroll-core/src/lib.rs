//! payroll-core: Core library for merging labor and tips exports into a
//! payroll import file
//!
//! This library provides functionality to:
//! - Tokenize CSV exports (quoted fields, CRLF/LF, blank-row suppression)
//! - Resolve header columns with fixed fallback positions
//! - Validate rows and map job codes/titles to departments
//! - Merge hours and tips records into ledger lines
//! - Render the ledger as CSV and deliver it once both exports are valid

pub mod columns;
pub mod config;
pub mod departments;
pub mod error;
pub mod export;
pub mod labor;
pub mod ledger;
pub mod parser;
pub mod pipeline;
pub mod table;
pub mod tips;
pub mod values;

pub use columns::{ColumnSpec, HeaderMap, LaborColumns, TipsColumns};
pub use config::ImportConfig;
pub use departments::{Department, DepartmentMap};
pub use error::{Error, Result, SourceFile};
pub use export::{to_csv, to_json, write_csv};
pub use labor::{build_hours_records, HoursRecord};
pub use ledger::{merge, LedgerLine, LineType};
pub use parser::{parse_file, read_source, tokenize};
pub use pipeline::{
    run_import, run_to_sink, CsvSink, FileSink, FileSource, ImportJoin, MemorySink, PayrollRun,
    TextSource,
};
pub use table::Row;
pub use tips::{build_tips_records, TipsRecord};
pub use values::EmployeeId;
