//! Atomic JSON output.
//!
//! Records are serialized as a pretty-printed array into a temporary file
//! next to the destination, which is then renamed over it. A failed run
//! leaves either the previous file or nothing, never a truncated document.

use crate::error::{NormalizerError, Result};
use crate::models::NormalizedRecord;
use serde_json::error::Category;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `records` to `path` as a JSON array, all or nothing
///
/// Non-ASCII text is written literally and indentation is two spaces.
/// Missing parent directories are created.
pub fn write_records(path: &Path, records: &[NormalizedRecord]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| NormalizerError::io(parent, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| NormalizerError::io(parent, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, records).map_err(|e| match e.classify() {
            Category::Io => NormalizerError::io(path, e.into()),
            _ => NormalizerError::Serialization {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        writer.flush().map_err(|e| NormalizerError::io(path, e))?;
    }
    temp.as_file()
        .sync_all()
        .map_err(|e| NormalizerError::io(path, e))?;

    temp.persist(path)
        .map_err(|e| NormalizerError::io(path, e.error))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
