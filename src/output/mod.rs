//! Output document serialization.
//!
//! The forest is emitted as a JSON array of root entries, in the order the
//! forest builder produced them. No reordering, deduplication, or pretty
//! printing: re-running over an unchanged environment must produce a
//! structurally identical document.

use std::path::Path;

use crate::core::PiptreeError;
use crate::models::DependencyNode;
use crate::utils::fs::atomic_write;

/// Render the forest as its JSON document.
pub fn to_json(forest: &[DependencyNode]) -> Result<String, PiptreeError> {
    Ok(serde_json::to_string(forest)?)
}

/// Write the forest document to `path`.
///
/// This is the one fatal failure path in the resolver: a document that
/// cannot be written aborts the run with a non-zero exit.
pub fn write_document(path: &Path, forest: &[DependencyNode]) -> Result<(), PiptreeError> {
    let json = to_json(forest)?;
    atomic_write(path, json.as_bytes()).map_err(|source| PiptreeError::OutputWrite {
        path: path.display().to_string(),
        source,
    })
}
