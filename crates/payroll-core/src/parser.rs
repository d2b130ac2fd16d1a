//! CSV tokenizer for payroll export files

use crate::error::{Error, Result};
use crate::table::Row;
use std::fs;
use std::path::Path;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split CSV text into rows of raw fields
///
/// Quoted fields may contain commas, line breaks and doubled `""` quotes.
/// `\n`, `\r` and `\r\n` all end a row. Rows whose fields are all blank
/// are dropped, which also swallows trailing newlines. Fields are returned
/// untrimmed. A leading byte-order mark is ignored. Never fails: any
/// text tokenizes.
pub fn tokenize(text: &str) -> Vec<Row> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }

    // Input without a trailing newline still has a pending row
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_row(&mut rows, fields);
    }

    rows
}

fn push_row(rows: &mut Vec<Row>, fields: Vec<String>) {
    let row = Row::new(fields);
    if !row.is_blank() {
        rows.push(row);
    }
}

/// Read a file as text, dropping a leading byte-order mark
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Read and tokenize a CSV file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let text = read_source(path)?;
    Ok(tokenize(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fields(row: &Row) -> Vec<&str> {
        row.fields.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_tokenize_simple() {
        let rows = tokenize("Employee ID,Job\n42,Server\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["Employee ID", "Job"]);
        assert_eq!(fields(&rows[1]), vec!["42", "Server"]);
    }

    #[test]
    fn test_tokenize_drops_blank_lines() {
        let rows = tokenize("a,b\n\n\nc,d\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[1]), vec!["c", "d"]);
    }

    #[test]
    fn test_tokenize_drops_rows_of_empty_fields() {
        let rows = tokenize("a,b\n,,\n  , \nc,d");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_tokenize_crlf_and_lf() {
        let rows = tokenize("a,b\r\nc,d\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["a", "b"]);
        assert_eq!(fields(&rows[1]), vec!["c", "d"]);
    }

    #[test]
    fn test_tokenize_bare_cr() {
        let rows = tokenize("a,b\rc,d\r");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[1]), vec!["c", "d"]);
    }

    #[test]
    fn test_tokenize_no_trailing_newline() {
        let rows = tokenize("a,b\nc,d");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[1]), vec!["c", "d"]);
    }

    #[test]
    fn test_tokenize_trailing_empty_field_without_newline() {
        let rows = tokenize("a,");
        assert_eq!(rows.len(), 1);
        assert_eq!(fields(&rows[0]), vec!["a", ""]);
    }

    #[test]
    fn test_tokenize_quoted_fields() {
        let rows = tokenize("name,note\n\"Smith, Jo\",\"said \"\"hi\"\"\"\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[1]), vec!["Smith, Jo", "said \"hi\""]);
    }

    #[test]
    fn test_tokenize_newline_inside_quotes() {
        let rows = tokenize("a,\"line one\r\nline two\"\nb,c\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["a", "line one\r\nline two"]);
    }

    #[test]
    fn test_tokenize_keeps_whitespace() {
        let rows = tokenize(" 42 , Server \n");
        assert_eq!(fields(&rows[0]), vec![" 42 ", " Server "]);
    }

    #[test]
    fn test_tokenize_ragged_rows() {
        let rows = tokenize("a,b,c\n1\n1,2,3,4\n");
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
        assert_eq!(rows[1].field(2), "");
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\r\n\n").is_empty());
    }

    #[test]
    fn test_tokenize_round_trips_standard_quoting() {
        let original = vec![
            "42".to_string(),
            "Smith, \"Jo\"".to_string(),
            "plain".to_string(),
            "\"\"".to_string(),
        ];

        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());
        writer.write_record(&original).unwrap();
        writer.flush().unwrap();
        let encoded = String::from_utf8(writer.get_ref().clone()).unwrap();

        let rows = tokenize(&encoded);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields, original);

        // Quote everything and parse again
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(Vec::new());
        writer.write_record(&rows[0].fields).unwrap();
        writer.flush().unwrap();
        let encoded = String::from_utf8(writer.get_ref().clone()).unwrap();

        assert_eq!(tokenize(&encoded)[0].fields, original);
    }

    #[test]
    fn test_tokenize_ignores_leading_bom() {
        let rows = tokenize("\u{feff}Employee ID,Job\n7,Host\n");
        assert_eq!(fields(&rows[0]), vec!["Employee ID", "Job"]);

        // Only a leading mark is dropped
        let rows = tokenize("a,\u{feff}b\n");
        assert_eq!(fields(&rows[0]), vec!["a", "\u{feff}b"]);
    }

    #[test]
    fn test_read_source_strips_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}Employee ID,Job\n7,Host\n").unwrap();

        let text = read_source(file.path()).unwrap();
        assert!(text.starts_with("Employee ID"));

        let rows = parse_file(file.path()).unwrap();
        assert_eq!(rows[0].field(0), "Employee ID");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source("/nonexistent/labor.csv").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
