//! Merges hours and tips records into payroll ledger lines

use crate::departments::Department;
use crate::labor::HoursRecord;
use crate::tips::TipsRecord;
use crate::values::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pay type of a ledger line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineType {
    /// Regular hours
    Reg,
    /// Overtime hours
    Ot,
    /// Pooled tips
    Tpcrrs,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Reg => "REG",
            LineType::Ot => "OT",
            LineType::Tpcrrs => "TPCRRS",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the payroll import file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLine {
    pub employee_id: u64,
    #[serde(rename = "type")]
    pub line_type: LineType,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    /// Already rounded to cents
    pub amount: Option<f64>,
    pub dept: Department,
}

impl LedgerLine {
    /// Regular pay line; amount is hours times rate
    pub fn regular(record: &HoursRecord) -> Self {
        Self {
            employee_id: record.employee_id.number(),
            line_type: LineType::Reg,
            hours: Some(record.regular_hours),
            rate: Some(record.normal_rate),
            amount: Some(round2(record.regular_hours * record.normal_rate)),
            dept: record.dept,
        }
    }

    /// Overtime line; carries hours and rate but no amount
    pub fn overtime(record: &HoursRecord) -> Self {
        Self {
            employee_id: record.employee_id.number(),
            line_type: LineType::Ot,
            hours: Some(record.overtime_hours),
            rate: Some(record.normal_rate),
            amount: None,
            dept: record.dept,
        }
    }

    /// Pooled tips line; amount only
    pub fn tips(record: &TipsRecord) -> Self {
        Self {
            employee_id: record.employee_id.number(),
            line_type: LineType::Tpcrrs,
            hours: None,
            rate: None,
            amount: Some(round2(record.tips)),
            dept: record.dept,
        }
    }
}

/// Build the ledger: every hours record as REG then OT, then every tips
/// record, each in input order
///
/// Employees present in both inputs get independent lines; nothing is
/// sorted, deduplicated or reconciled.
pub fn merge(hours: &[HoursRecord], tips: &[TipsRecord]) -> Vec<LedgerLine> {
    let mut lines = Vec::with_capacity(hours.len() * 2 + tips.len());

    for record in hours {
        lines.push(LedgerLine::regular(record));
        lines.push(LedgerLine::overtime(record));
    }
    lines.extend(tips.iter().map(LedgerLine::tips));

    lines
}
