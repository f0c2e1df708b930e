//! Cross-platform utilities and file operations.

pub mod fs;

use std::path::PathBuf;

/// Expand a leading `~` in a user-supplied path.
///
/// Environment variables like `PIP_TARGET` are shell-adjacent and often
/// carry unexpanded home-relative paths.
#[must_use]
pub fn expand_path(input: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(input).into_owned())
}
