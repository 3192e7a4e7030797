//! Input file discovery

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use tracing::warn;

use super::config::INPUT_PATTERN;
use super::error::{ConvertError, ConvertResult};

/// Lazily list the `*.txt` files directly inside `input_dir`.
///
/// An empty directory yields nothing. A missing directory is an error.
/// Unreadable entries are logged and skipped.
pub fn scan_input_files(input_dir: &Path) -> ConvertResult<impl Iterator<Item = PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ConvertError::InputDirMissing(input_dir.to_path_buf()));
    }

    let escaped = Pattern::escape(&input_dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(INPUT_PATTERN);
    let pattern = pattern.to_string_lossy().into_owned();

    let paths = glob(&pattern).map_err(|e| ConvertError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.msg.to_string(),
    })?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_file()))
}
