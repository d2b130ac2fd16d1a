//! Header resolution for the two export layouts

use crate::table::Row;
use std::collections::HashMap;
use tracing::debug;

/// Lower-cased, trimmed header name -> column index
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    positions: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build from a header row; on duplicate names the first one wins
    pub fn from_header(header: &Row) -> Self {
        let mut positions = HashMap::new();
        for (index, name) in header.fields.iter().enumerate() {
            positions
                .entry(name.trim().to_lowercase())
                .or_insert(index);
        }
        Self { positions }
    }

    /// Index of a column, if the header names it
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&name.trim().to_lowercase()).copied()
    }
}

/// A named column with the index to use when the header lacks it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub fallback: usize,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, fallback: usize) -> Self {
        Self { name, fallback }
    }

    /// Header position of this column, or its fallback when absent
    pub fn resolve(&self, headers: &HeaderMap) -> usize {
        match headers.position(self.name) {
            Some(index) => index,
            None => {
                debug!(
                    column = self.name,
                    fallback = self.fallback,
                    "column not in header, using fallback index"
                );
                self.fallback
            }
        }
    }
}

/// Labor export column names and fallback positions
pub mod labor {
    use super::ColumnSpec;

    pub const EMPLOYEE_ID: ColumnSpec = ColumnSpec::new("employee id", 14);
    pub const REGULAR_HOURS: ColumnSpec = ColumnSpec::new("regular hours", 2);
    pub const OVERTIME_HOURS: ColumnSpec = ColumnSpec::new("overtime hours", 3);
    pub const JOB_CODE: ColumnSpec = ColumnSpec::new("job code", 15);
    pub const NORMAL_RATE: ColumnSpec = ColumnSpec::new("normal rate", 4);
}

/// Tips export column names and fallback positions
pub mod tips {
    use super::ColumnSpec;

    pub const EMPLOYEE_ID: ColumnSpec = ColumnSpec::new("employee id", 0);
    pub const JOB: ColumnSpec = ColumnSpec::new("job", 2);
    pub const POOLED_TIPS: ColumnSpec = ColumnSpec::new("tips and gratuity after pooling", 18);
}

/// Resolved column indices for a labor export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaborColumns {
    pub employee_id: usize,
    pub regular_hours: usize,
    pub overtime_hours: usize,
    pub job_code: usize,
    pub normal_rate: usize,
}

impl LaborColumns {
    pub fn resolve(headers: &HeaderMap) -> Self {
        Self {
            employee_id: labor::EMPLOYEE_ID.resolve(headers),
            regular_hours: labor::REGULAR_HOURS.resolve(headers),
            overtime_hours: labor::OVERTIME_HOURS.resolve(headers),
            job_code: labor::JOB_CODE.resolve(headers),
            normal_rate: labor::NORMAL_RATE.resolve(headers),
        }
    }
}

/// Resolved column indices for a tips export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipsColumns {
    pub employee_id: usize,
    pub job: usize,
    pub pooled_tips: usize,
}

impl TipsColumns {
    pub fn resolve(headers: &HeaderMap) -> Self {
        Self {
            employee_id: tips::EMPLOYEE_ID.resolve(headers),
            job: tips::JOB.resolve(headers),
            pooled_tips: tips::POOLED_TIPS.resolve(headers),
        }
    }
}
