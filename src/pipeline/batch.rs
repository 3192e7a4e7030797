//! Per-file conversion and the sequential batch loop

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::config::Config;
use super::normalize::normalize_table;
use super::reader::{read_source, read_table};
use super::reconcile::reconcile;
use super::scanner::scan_input_files;
use super::writer::write_xlsx;
use crate::report::{append_error_record, FileOutcome, RunSummary};

/// Convert one source file: read, normalize, write, reconcile.
///
/// A row-count mismatch is appended to the error log and reported in the
/// outcome; it is not an error.
pub fn convert_file(path: &Path, config: &Config) -> Result<FileOutcome> {
    let encoding = config.encoding()?;

    let (table, read_report) = read_table(path, config)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    let table = normalize_table(table);

    let output_path = config.output_path_for(path);
    write_xlsx(&table, &output_path)
        .with_context(|| format!("Failed to write workbook: {}", output_path.display()))?;

    // Raw lines are re-read on their own so the count does not depend on the parser
    let source = read_source(path, encoding)
        .with_context(|| format!("Failed to re-read source file: {}", path.display()))?;
    let mismatch = reconcile(&source, &table, config)
        .with_context(|| format!("Failed to reconcile {}", path.display()))?;

    if let Some(record) = &mismatch {
        let log_path = config.error_log_path();
        warn!(
            file = %record.file_name,
            original_lines = record.original_lines,
            new_lines = record.new_lines,
            "row count mismatch"
        );
        append_error_record(&log_path, record, encoding)
            .with_context(|| format!("Failed to append to {}", log_path.display()))?;
    }

    info!(
        file = %path.display(),
        rows = table.height(),
        skipped = read_report.skipped_count(),
        "converted"
    );

    Ok(FileOutcome {
        source: path.to_path_buf(),
        output: output_path,
        original_lines: source.line_count(),
        rows_written: table.height(),
        skipped_rows: read_report.skipped_count(),
        mismatch,
    })
}

/// Make sure the output directory exists before the first workbook is written.
pub fn prepare_output_dir(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })
}

/// Per-file hooks around the batch loop, for progress display.
pub trait RunObserver {
    fn file_started(&mut self, _path: &Path) {}

    fn file_finished(&mut self, _outcome: &FileOutcome) {}
}

/// No progress output.
impl RunObserver for () {}

/// Convert every input file in scan order, stopping at the first hard failure.
pub fn run(config: &Config) -> Result<RunSummary> {
    run_with(config, &mut ())
}

/// [`run`], reporting each file to `observer` before and after conversion.
pub fn run_with<O: RunObserver + ?Sized>(config: &Config, observer: &mut O) -> Result<RunSummary> {
    let files = scan_input_files(&config.input_dir)?;
    prepare_output_dir(config)?;

    let mut summary = RunSummary::default();
    for path in files {
        observer.file_started(&path);
        let outcome = convert_file(&path, config)?;
        observer.file_finished(&outcome);
        summary.push(outcome);
    }
    Ok(summary)
}
