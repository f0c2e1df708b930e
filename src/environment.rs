//! Site-packages discovery for the host Python environment.
//!
//! The resolver reads the metadata store of whatever environment the caller
//! points it at. Candidate directories are collected in precedence order:
//!
//! 1. Explicit paths from [`ResolverConfig`](crate::resolver::ResolverConfig)
//! 2. `$PIP_TARGET` (honored the same way the pip invocation path merges it
//!    into `PYTHONPATH`)
//! 3. Each `$PYTHONPATH` entry
//! 4. `$VIRTUAL_ENV` site-packages layouts (POSIX `lib/python*/site-packages`
//!    and Windows `Lib/site-packages`)
//! 5. A `.venv` directory in the current working directory
//!
//! Directories that do not exist are skipped silently; duplicates are
//! visited once. Earlier entries shadow later ones when the same package
//! appears twice, matching import-path precedence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::expand_path;

/// Resolve the ordered list of site-packages directories to scan.
#[must_use]
pub fn site_packages_dirs(explicit: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut dirs = Vec::new();
    let mut push = |path: PathBuf, dirs: &mut Vec<PathBuf>| {
        if path.is_dir() && seen.insert(path.clone()) {
            dirs.push(path);
        }
    };

    for path in explicit {
        push(path.clone(), &mut dirs);
    }

    if let Ok(target) = std::env::var("PIP_TARGET") {
        if !target.is_empty() {
            push(expand_path(&target), &mut dirs);
        }
    }

    if let Ok(pythonpath) = std::env::var("PYTHONPATH") {
        for entry in std::env::split_paths(&pythonpath) {
            if !entry.as_os_str().is_empty() {
                push(entry, &mut dirs);
            }
        }
    }

    if let Ok(venv) = std::env::var("VIRTUAL_ENV") {
        if !venv.is_empty() {
            for path in venv_site_packages(&expand_path(&venv)) {
                push(path, &mut dirs);
            }
        }
    }

    for path in venv_site_packages(Path::new(".venv")) {
        push(path, &mut dirs);
    }

    debug!(candidates = dirs.len(), "resolved site-packages directories");
    dirs
}

/// Site-packages directories inside a virtualenv root.
///
/// POSIX virtualenvs nest the directory under a versioned `lib/pythonX.Y`
/// segment; Windows uses a flat `Lib\site-packages`.
fn venv_site_packages(root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    let lib = root.join("lib");
    if let Ok(entries) = std::fs::read_dir(&lib) {
        let mut versioned: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("python"))
            .map(|e| e.path().join("site-packages"))
            .collect();
        versioned.sort();
        paths.extend(versioned);
    }

    paths.push(root.join("Lib").join("site-packages"));
    paths
}
