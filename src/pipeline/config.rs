//! Pipeline configuration.
//!
//! Parsing parameters are fixed for the SAP text exports this tool targets;
//! only the two directories are expected to differ between machines.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use super::error::{ConvertError, ConvertResult};

/// Default folder holding the exported `.txt` reports.
pub const DEFAULT_INPUT_DIR: &str = "SAP Extract Input";

/// Name of the output folder, created next to the input folder.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "Excel Output";

/// Glob pattern for input files, relative to the input directory.
pub const INPUT_PATTERN: &str = "*.txt";

/// Extension given to converted workbooks.
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// Shared append-only log of row-count mismatches.
pub const ERROR_LOG_NAME: &str = "errors.txt";

/// Everything the pipeline needs to know about where files live and how they are encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: u8,
    pub quote_char: u8,
    /// WHATWG encoding label used for reading sources and writing the error log
    pub encoding: String,
    pub skip_malformed_rows: bool,
}

impl Default for Config {
    fn default() -> Self {
        let input_dir = PathBuf::from(DEFAULT_INPUT_DIR);
        let output_dir = default_output_dir(&input_dir);
        Self {
            input_dir,
            output_dir,
            delimiter: b'|',
            quote_char: b'"',
            encoding: "iso-8859-1".to_string(),
            skip_malformed_rows: true,
        }
    }
}

impl Config {
    /// Build a config for the given directories, keeping the fixed parsing parameters.
    pub fn with_dirs(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Resolve the configured encoding label.
    pub fn encoding(&self) -> ConvertResult<&'static Encoding> {
        Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| ConvertError::UnsupportedEncoding(self.encoding.clone()))
    }

    /// Workbook path for a source file: same stem, `.xlsx`, in the output directory.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        self.output_dir.join(format!("{}.{}", stem, OUTPUT_EXTENSION))
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.output_dir.join(ERROR_LOG_NAME)
    }
}

/// The output folder sits beside the input folder.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    let parent = match input_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(DEFAULT_OUTPUT_DIR_NAME)
}
