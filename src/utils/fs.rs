//! Atomic file operations.
//!
//! The output document is the one artifact downstream tooling consumes; a
//! partially-written file is worse than no file. Writes go to a temporary
//! sibling first and are renamed into place.

use std::fs;
use std::io::Write;
use std::path::Path;

/// Create a directory and all parents if missing.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write `content` to `path` atomically.
///
/// The content is written to a `.tmp` sibling, synced, and renamed over the
/// destination. The destination either keeps its old content or holds the
/// complete new content; it is never partial.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    ensure_parent_dir(path)?;
    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}
