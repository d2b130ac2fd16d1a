//! Renders ledger lines for delivery

use crate::error::{Error, Result};
use crate::ledger::LedgerLine;
use std::io::Write;

/// Header row of the payroll import file
pub const HEADER: [&str; 6] = ["employee_id", "type", "hours", "rate", "amount", "dept"];

/// Write ledger lines as CSV
///
/// Fields are written verbatim with no quoting; every value is a number,
/// a fixed tag, or empty. Amounts always show two decimals.
pub fn write_csv<W: Write>(lines: &[LedgerLine], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for line in lines {
        csv_writer.write_record([
            line.employee_id.to_string(),
            line.line_type.to_string(),
            line.hours.map(format_quantity).unwrap_or_default(),
            line.rate.map(format_quantity).unwrap_or_default(),
            line.amount.map(format_amount).unwrap_or_default(),
            line.dept.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render ledger lines as CSV text
pub fn to_csv(lines: &[LedgerLine]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(lines, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Render ledger lines as pretty JSON
pub fn to_json(lines: &[LedgerLine]) -> Result<String> {
    Ok(serde_json::to_string_pretty(lines)?)
}

/// Hours and rates: shortest form, `2` rather than `2.0`
fn format_quantity(value: f64) -> String {
    value.to_string()
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}
