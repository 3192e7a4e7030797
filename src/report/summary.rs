//! Run summary report generation

use std::path::PathBuf;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::ErrorRecord;

/// Result of converting a single source file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_lines: usize,
    pub rows_written: usize,
    pub skipped_rows: usize,
    pub mismatch: Option<ErrorRecord>,
}

impl FileOutcome {
    pub fn is_reconciled(&self) -> bool {
        self.mismatch.is_none()
    }

    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Summary of a whole batch run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn mismatch_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_reconciled()).count()
    }

    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows_written).sum()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        if self.files.is_empty() {
            println!("    No input files found.");
            return;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Source Lines").add_attribute(Attribute::Bold),
            Cell::new("Rows Written").add_attribute(Attribute::Bold),
            Cell::new("Skipped").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

        for file in &self.files {
            let status = if file.is_reconciled() {
                Cell::new("OK").fg(Color::Green)
            } else {
                Cell::new("MISMATCH")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold)
            };
            table.add_row(vec![
                Cell::new(file.file_name()),
                Cell::new(file.original_lines),
                Cell::new(file.rows_written),
                Cell::new(file.skipped_rows).fg(if file.skipped_rows == 0 {
                    Color::White
                } else {
                    Color::Yellow
                }),
                status,
            ]);
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      {} file(s), {} row(s) written, {} mismatch(es)",
            style(self.file_count()).cyan().bold(),
            style(self.total_rows()).cyan().bold(),
            if self.mismatch_count() == 0 {
                style(self.mismatch_count()).green().bold()
            } else {
                style(self.mismatch_count()).red().bold()
            }
        );
    }
}
