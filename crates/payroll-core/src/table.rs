//! Row type shared by the tokenizer and the record builders

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One tokenized CSV row
///
/// Rows carry no column semantics; meaning comes from resolved header
/// indices. Rows in the same file may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Raw field values, untrimmed
    pub fields: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a raw field, `""` when the index is past the end of the row
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Get a trimmed field, `""` when the index is past the end of the row
    pub fn trimmed(&self, index: usize) -> &str {
        self.field(index).trim()
    }

    /// True when every field is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl<'a> From<Vec<&'a str>> for Row {
    fn from(fields: Vec<&'a str>) -> Self {
        Self::new(fields.into_iter().map(str::to_string).collect())
    }
}

/// Data rows of a tokenized file, paired with their 1-based row number
///
/// Row 0 is the header and is skipped. At most `max_data_rows` rows are
/// yielded; anything past the cap is ignored.
pub fn data_rows(rows: &[Row], max_data_rows: usize) -> impl Iterator<Item = (usize, &Row)> {
    let available = rows.len().saturating_sub(1);
    if available > max_data_rows {
        warn!(
            rows = available,
            cap = max_data_rows,
            "data rows past the cap are ignored"
        );
    }

    rows.iter()
        .enumerate()
        .skip(1)
        .take(max_data_rows)
        .map(|(index, row)| (index + 1, row))
}
