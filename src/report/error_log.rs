//! Append-only `errors.txt` log of reconciliation mismatches

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use encoding_rs::Encoding;

use crate::pipeline::{ConvertError, ConvertResult, ErrorRecord};

/// Render one log block.
pub fn format_error_record(record: &ErrorRecord) -> String {
    let mut block = format!(
        "{}: {} lines in original file, {} lines in new file\n",
        record.file_name, record.original_lines, record.new_lines
    );
    if !record.missing_lines.is_empty() {
        block.push_str("Missing lines:\n");
        for index in &record.missing_lines {
            block.push_str(&format!("{}\n", index));
        }
    }
    block
}

/// Append a record to the log, creating the file on first use.
pub fn append_error_record(
    path: &Path,
    record: &ErrorRecord,
    encoding: &'static Encoding,
) -> ConvertResult<()> {
    let block = format_error_record(record);
    let (bytes, _, had_errors) = encoding.encode(&block);
    if had_errors {
        return Err(ConvertError::Encode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&bytes)?;
    Ok(())
}
