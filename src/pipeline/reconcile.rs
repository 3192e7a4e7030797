//! Row-count reconciliation between a source file and its converted table
//!
//! Malformed rows are dropped silently by the reader, so the only way to notice
//! them is to compare the raw line count with what ended up in the workbook.

use std::io;

use csv::{QuoteStyle, WriterBuilder};

use super::config::Config;
use super::error::{ConvertError, ConvertResult};
use super::reader::{split_lines, SourceFile};
use super::table::Table;

/// A file whose line count did not match its converted row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub file_name: String,
    pub original_lines: usize,
    pub new_lines: usize,
    /// 0-based indices of lines that differ from the re-serialized table
    pub missing_lines: Vec<usize>,
}

/// One header line is expected on top of the data rows.
pub fn is_reconciled(original_lines: usize, new_lines: usize) -> bool {
    original_lines == new_lines + 1 || (original_lines == 0 && new_lines == 0)
}

/// Compare a source file with the table built from it.
///
/// Returns `None` when the counts agree. Otherwise the raw lines are compared
/// index by index with the re-serialized table; see [`missing_line_indices`].
pub fn reconcile(
    source: &SourceFile,
    table: &Table,
    config: &Config,
) -> ConvertResult<Option<ErrorRecord>> {
    let original_lines = source.line_count();
    let new_lines = table.height();
    if is_reconciled(original_lines, new_lines) {
        return Ok(None);
    }

    let new_data = serialize_table(table, config)?;
    Ok(Some(ErrorRecord {
        file_name: source.file_name(),
        original_lines,
        new_lines,
        missing_lines: missing_line_indices(&source.lines, &new_data),
    }))
}

/// Render the table back to delimited text, header first.
pub fn serialize_table(table: &Table, config: &Config) -> ConvertResult<Vec<String>> {
    if !table.has_header() {
        return Ok(Vec::new());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote(config.quote_char)
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConvertError::Io(e.into_error()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ConvertError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(split_lines(&text))
}

/// Indices where the original line differs from the line at the same position.
///
/// This is a plain positional comparison, not a diff: once a row has been
/// dropped every following line is shifted and gets flagged too. Positions past
/// the end of `new_data` count as missing.
pub fn missing_line_indices(original_data: &[String], new_data: &[String]) -> Vec<usize> {
    original_data
        .iter()
        .enumerate()
        .filter(|(i, line)| {
            new_data
                .get(*i)
                .map_or(true, |new_line| line.trim() != new_line.trim())
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::reader::parse_lines;
    use std::path::PathBuf;

    fn source(text: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from("/in/report.txt"),
            lines: split_lines(text),
        }
    }

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_convention() {
        assert!(is_reconciled(100, 99));
        assert!(is_reconciled(0, 0));
        assert!(!is_reconciled(100, 100));
        assert!(!is_reconciled(50, 46));
    }

    #[test]
    fn test_clean_file_reconciles() {
        let config = Config::default();
        let src = source("A|B\nx|y\nz|w\n");
        let (table, _) = parse_lines(&src.lines, &config).unwrap();
        assert_eq!(reconcile(&src, &table, &config).unwrap(), None);
    }

    #[test]
    fn test_dropped_row_is_reported() {
        let config = Config::default();
        let src = source("A|B\nx|y\n\"bad|row\nz|w\n");
        let (table, _) = parse_lines(&src.lines, &config).unwrap();
        let record = reconcile(&src, &table, &config).unwrap().unwrap();
        assert_eq!(record.file_name, "report.txt");
        assert_eq!(record.original_lines, 4);
        assert_eq!(record.new_lines, 2);
        // line 2 is the dropped one; line 3 has no counterpart after the shift
        assert_eq!(record.missing_lines, vec![2, 3]);
    }

    #[test]
    fn test_serialize_table_round_trips_plain_rows() {
        let config = Config::default();
        let src = source("Name|Qty\nWidget|3\n\"a|b\"|4\n");
        let (table, _) = parse_lines(&src.lines, &config).unwrap();
        let lines = serialize_table(&table, &config).unwrap();
        assert_eq!(lines, strings(&["Name|Qty", "Widget|3", "\"a|b\"|4"]));
    }

    #[test]
    fn test_missing_indices_are_positional() {
        let original = strings(&["h", "a", "b", "c"]);
        let new = strings(&["h", "a", "c"]);
        assert_eq!(missing_line_indices(&original, &new), vec![2, 3]);
    }

    #[test]
    fn test_missing_indices_ignore_surrounding_whitespace() {
        let original = strings(&["h ", "  a"]);
        let new = strings(&["h", "a"]);
        assert!(missing_line_indices(&original, &new).is_empty());
    }
}
