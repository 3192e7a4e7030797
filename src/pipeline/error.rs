//! Error types for the conversion pipeline.
//!
//! Row-level parse problems are not errors: malformed rows are skipped by the
//! reader and only show up later as a reconciliation mismatch. The variants
//! here are the failures that stop a batch.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a batch of text exports.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The configured input directory does not exist or is not a directory.
    #[error("Input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    /// The input directory path could not be turned into a glob pattern.
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Pattern that failed to compile
        pattern: String,
        /// Message from the glob parser
        message: String,
    },

    /// The configured encoding label is not known to `encoding_rs`.
    #[error("Unsupported character encoding: {0}")]
    UnsupportedEncoding(String),

    /// Input bytes could not be decoded with the configured encoding.
    ///
    /// Only reachable for labels with unmapped byte values, such as `utf-8`.
    /// windows-1252, which `iso-8859-1` resolves to, maps all 256 bytes.
    #[error("Failed to decode {} as {encoding}", .path.display())]
    Decode {
        /// File being decoded
        path: PathBuf,
        /// Encoding name used for decoding
        encoding: &'static str,
    },

    /// Output text contains characters the configured encoding cannot represent.
    #[error("Cannot encode text for {} as {encoding}", .path.display())]
    Encode {
        /// File being written
        path: PathBuf,
        /// Encoding name used for encoding
        encoding: &'static str,
    },

    /// A row could not be parsed and skipping malformed rows is turned off.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow {
        /// 1-based line number in the source file
        line: usize,
        reason: String,
    },

    /// A delimited record could not be parsed or re-serialized.
    #[error("Delimited record error: {0}")]
    Record(#[from] csv::Error),

    /// The spreadsheet writer rejected the table.
    #[error("Spreadsheet write failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
