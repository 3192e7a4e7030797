//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tempfile::TempDir;

pub const HEADER: &str = "Material|Description|Qty|Posting Date";

/// Input and output folders laid out like a real run: `<root>/input` and `<root>/output`.
pub struct Workspace {
    pub root: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let input = root.path().join("input");
        let output = root.path().join("output");
        std::fs::create_dir(&input).unwrap();
        Self {
            root,
            input,
            output,
        }
    }

    /// Write an ISO-8859-1 encoded source file into the input folder.
    pub fn write_source(&self, name: &str, lines: &[String]) -> PathBuf {
        let path = self.input.join(name);
        write_latin1(&path, lines);
        path
    }

    pub fn error_log(&self) -> PathBuf {
        self.output.join("errors.txt")
    }

    pub fn read_error_log(&self) -> String {
        std::fs::read_to_string(self.error_log()).unwrap_or_default()
    }
}

pub fn write_latin1(path: &Path, lines: &[String]) {
    let mut text = lines.join("\n");
    text.push('\n');
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(&text);
    assert!(!had_errors, "fixture text must be Latin-1 encodable");
    std::fs::write(path, bytes).unwrap();
}

/// A well-formed data line
pub fn good_row(i: usize) -> String {
    format!("M{:05}|Item {}|{}|15.06.2020", i, i, i % 7 + 1)
}

/// A data line with an unterminated quote
pub fn broken_row(i: usize) -> String {
    format!("M{:05}|\"Broken item {}|{}|01.01.0001", i, i, i % 7 + 1)
}

/// Header plus `rows` well-formed data lines
pub fn clean_lines(rows: usize) -> Vec<String> {
    let mut lines = vec![HEADER.to_string()];
    lines.extend((1..=rows).map(good_row));
    lines
}

/// Header plus `rows` data lines; the 1-based data rows listed in `broken` are malformed
pub fn lines_with_broken(rows: usize, broken: &[usize]) -> Vec<String> {
    let mut lines = vec![HEADER.to_string()];
    lines.extend((1..=rows).map(|i| {
        if broken.contains(&i) {
            broken_row(i)
        } else {
            good_row(i)
        }
    }));
    lines
}

/// First worksheet of a written workbook
pub fn read_sheet(path: &Path) -> Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let name = workbook.sheet_names()[0].clone();
    workbook.worksheet_range(&name).unwrap()
}

/// Data rows in a sheet (header excluded)
pub fn data_row_count(range: &Range<Data>) -> usize {
    range.height().saturating_sub(1)
}
