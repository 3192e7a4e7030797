//! Tabular reader for pipe-delimited SAP text exports
//!
//! Each physical line is one record. The first non-blank line is the header.
//! Lines with unbalanced quoting or more fields than the header are skipped,
//! which is why the reconciler later sees fewer rows than source lines.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use tracing::debug;

use super::config::Config;
use super::error::{ConvertError, ConvertResult};
use super::table::{CellValue, Row, Table};

/// Raw contents of one source file, decoded and split into lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Why a row was left out of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnbalancedQuotes,
    TooManyFields { expected: usize, found: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnbalancedQuotes => write!(f, "unbalanced quotes"),
            SkipReason::TooManyFields { expected, found } => {
                write!(f, "expected {} fields, saw {}", expected, found)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub reason: SkipReason,
}

/// Rows the reader dropped while building a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadReport {
    pub skipped: Vec<SkippedRow>,
}

impl ReadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Decode a source file with the given encoding and split it into lines.
///
/// Line breaks may be `\n`, `\r\n` or a lone `\r`. A trailing line break does
/// not start an extra line.
pub fn read_source(path: &Path, encoding: &'static Encoding) -> ConvertResult<SourceFile> {
    let bytes = fs::read(path)?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .ok_or_else(|| ConvertError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

    Ok(SourceFile {
        path: path.to_path_buf(),
        lines: split_lines(&text),
    })
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Read and parse one source file into a table.
pub fn read_table(path: &Path, config: &Config) -> ConvertResult<(Table, ReadReport)> {
    let source = read_source(path, config.encoding()?)?;
    parse_lines(&source.lines, config)
}

/// Parse already-split lines into a table.
pub fn parse_lines(lines: &[String], config: &Config) -> ConvertResult<(Table, ReadReport)> {
    let builder = record_builder(config);
    let mut report = ReadReport::default();
    let mut columns: Option<Vec<String>> = None;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        if columns.is_none() {
            let record = parse_record(&builder, line)?;
            columns = Some(header_names(&record));
            continue;
        }
        let width = columns.as_ref().map_or(0, Vec::len);

        if has_unbalanced_quotes(line, config.quote_char) {
            skip_or_fail(&mut report, line_no, SkipReason::UnbalancedQuotes, config)?;
            continue;
        }

        let record = parse_record(&builder, line)?;
        if record.len() > width {
            let reason = SkipReason::TooManyFields {
                expected: width,
                found: record.len(),
            };
            skip_or_fail(&mut report, line_no, reason, config)?;
            continue;
        }

        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(width, String::new());
        raw_rows.push(fields);
    }

    let columns = columns.unwrap_or_default();
    let rows = infer_cells(&columns, raw_rows);
    Ok((Table::new(columns, rows), report))
}

fn record_builder(config: &Config) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter)
        .quote(config.quote_char);
    builder
}

fn parse_record(builder: &ReaderBuilder, line: &str) -> ConvertResult<StringRecord> {
    let mut reader = builder.from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

fn skip_or_fail(
    report: &mut ReadReport,
    line: usize,
    reason: SkipReason,
    config: &Config,
) -> ConvertResult<()> {
    if !config.skip_malformed_rows {
        return Err(ConvertError::MalformedRow {
            line,
            reason: reason.to_string(),
        });
    }
    debug!(line, %reason, "skipping malformed row");
    report.skipped.push(SkippedRow { line, reason });
    Ok(())
}

pub fn has_unbalanced_quotes(line: &str, quote_char: u8) -> bool {
    line.bytes().filter(|&b| b == quote_char).count() % 2 == 1
}

/// Column names from the header record.
///
/// Blank names become `Unnamed: <index>`; repeated names get a `.1`, `.2`, ...
/// suffix so every column stays addressable.
fn header_names(record: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    record
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let unique = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// Turn raw strings into cells, typing columns where every value is numeric.
fn infer_cells(columns: &[String], raw_rows: Vec<Vec<String>>) -> Vec<Row> {
    let numeric: Vec<bool> = (0..columns.len())
        .map(|col| {
            let mut values = raw_rows
                .iter()
                .map(|row| row[col].as_str())
                .filter(|v| !v.is_empty())
                .peekable();
            values.peek().is_some() && values.all(looks_numeric)
        })
        .collect();

    raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&numeric)
                .map(|(value, &is_numeric)| {
                    if is_numeric && !value.is_empty() {
                        // looks_numeric already guarantees the parse succeeds
                        value
                            .trim()
                            .parse::<f64>()
                            .map(CellValue::Number)
                            .unwrap_or(CellValue::Text(value))
                    } else {
                        CellValue::from(value.as_str())
                    }
                })
                .collect()
        })
        .collect()
}

/// Plain decimal or scientific notation that fits a finite f64.
/// Rejects `inf`, `NaN` and literals that overflow, such as `1e400`.
pub fn looks_numeric(value: &str) -> bool {
    let v = value.trim();
    v.bytes().any(|b| b.is_ascii_digit())
        && v.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && v.parse::<f64>().map_or(false, f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        split_lines(text)
    }

    #[test]
    fn test_split_lines_handles_all_line_endings() {
        assert_eq!(lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(lines("a\nb\n").len(), 2);
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_header_and_rows() {
        let config = Config::default();
        let (table, report) =
            parse_lines(&lines("Name|City\nAlice|Berlin\nBob|Paris\n"), &config).unwrap();
        assert_eq!(table.columns, vec!["Name", "City"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows[1][1], CellValue::Text("Paris".into()));
        assert_eq!(report.skipped_count(), 0);
    }

    #[test]
    fn test_quoted_field_keeps_delimiter() {
        let config = Config::default();
        let (table, _) = parse_lines(&lines("A|B\n\"x|y\"|z\n"), &config).unwrap();
        assert_eq!(table.rows[0][0], CellValue::Text("x|y".into()));
        assert_eq!(table.rows[0][1], CellValue::Text("z".into()));
    }

    #[test]
    fn test_unbalanced_quotes_are_skipped() {
        let config = Config::default();
        let (table, report) =
            parse_lines(&lines("A|B\n1|2\n\"broken|3\n4|5\n"), &config).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(
            report.skipped,
            vec![SkippedRow {
                line: 3,
                reason: SkipReason::UnbalancedQuotes
            }]
        );
    }

    #[test]
    fn test_too_many_fields_are_skipped_and_short_rows_padded() {
        let config = Config::default();
        let (table, report) = parse_lines(&lines("A|B|C\n1|2|3|4\nx\n"), &config).unwrap();
        assert_eq!(table.height(), 1);
        assert_eq!(
            table.rows[0],
            vec![CellValue::Text("x".into()), CellValue::Empty, CellValue::Empty]
        );
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::TooManyFields {
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn test_malformed_row_is_error_when_not_skipping() {
        let config = Config {
            skip_malformed_rows: false,
            ..Default::default()
        };
        let err = parse_lines(&lines("A\n\"open\n"), &config).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let config = Config::default();
        let (table, report) = parse_lines(&lines("\nA|B\n\n1|2\n   \n"), &config).unwrap();
        assert_eq!(table.columns, vec!["A", "B"]);
        assert_eq!(table.height(), 1);
        assert_eq!(report.skipped_count(), 0);
    }

    #[test]
    fn test_numeric_columns_are_typed() {
        let config = Config::default();
        let (table, _) =
            parse_lines(&lines("Qty|Code|Date\n10|A1|15.06.2020\n2.5||01.01.0001\n"), &config)
                .unwrap();
        assert_eq!(table.rows[0][0], CellValue::Number(10.0));
        assert_eq!(table.rows[1][0], CellValue::Number(2.5));
        assert_eq!(table.rows[0][1], CellValue::Text("A1".into()));
        assert_eq!(table.rows[1][1], CellValue::Empty);
        assert_eq!(table.rows[0][2], CellValue::Text("15.06.2020".into()));
    }

    #[test]
    fn test_header_names_are_unique() {
        let config = Config::default();
        let (table, _) = parse_lines(&lines("A||A|A\n"), &config).unwrap();
        assert_eq!(table.columns, vec!["A", "Unnamed: 1", "A.1", "A.2"]);
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn test_looks_numeric() {
        assert!(looks_numeric("42"));
        assert!(looks_numeric("-3.5"));
        assert!(looks_numeric("1e3"));
        assert!(!looks_numeric("inf"));
        assert!(!looks_numeric("NaN"));
        assert!(!looks_numeric("15.06.2020"));
        assert!(!looks_numeric("."));
        assert!(!looks_numeric("1e400"));
        assert!(!looks_numeric(&"9".repeat(400)));
    }

    #[test]
    fn test_overflowing_numbers_stay_text() {
        let (table, _) = parse_lines(&lines("N\n1e400\n"), &Config::default()).unwrap();
        assert_eq!(table.rows, vec![vec![CellValue::Text("1e400".into())]]);
    }

    #[test]
    fn test_read_source_decodes_latin1() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("latin.txt");
        // "Müller" in ISO-8859-1
        fs::write(&path, b"Name\nM\xfcller\n").unwrap();
        let source = read_source(&path, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(source.line_count(), 2);
        assert_eq!(source.lines[1], "Müller");
        assert_eq!(source.file_name(), "latin.txt");
    }

    #[test]
    fn test_read_source_rejects_invalid_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, b"Name\nM\xfcller\n").unwrap();
        let err = read_source(&path, encoding_rs::UTF_8).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { encoding: "UTF-8", .. }));
    }
}
