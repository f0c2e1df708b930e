//! Installed-package metadata enumeration and indexing.
//!
//! [`MetadataIndex`] performs the one-time bulk read of an environment's
//! metadata store: every `*.dist-info` directory under the discovered
//! site-packages directories is parsed into a [`Distribution`] and indexed
//! by normalized package key. A lookup miss is a normal outcome:
//! a requirement pointing at an uninstalled package is simply not an edge.

pub mod distribution;
pub mod frozen;
pub mod requirement;

pub use distribution::Distribution;
pub use requirement::Requirement;

use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::PiptreeError;

static NORMALIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("valid regex"));

/// Normalize a package name into its canonical lookup key.
///
/// Lowercases and collapses runs of `-`, `_` and `.` into a single `-`,
/// so `My_Fancy.Package` and `my-fancy-package` resolve to the same record.
#[must_use]
pub fn normalize_package_key(name: &str) -> String {
    NORMALIZE_RE.replace_all(name, "-").to_lowercase()
}

/// Index of every installed distribution, keyed by normalized package name.
#[derive(Debug, Default)]
pub struct MetadataIndex {
    distributions: Vec<Distribution>,
    by_key: HashMap<String, usize>,
}

impl MetadataIndex {
    /// Build an index from already-loaded distributions.
    ///
    /// Duplicate keys keep the first occurrence, mirroring import-path
    /// precedence: an earlier site-packages directory shadows later ones.
    #[must_use]
    pub fn from_distributions(dists: Vec<Distribution>) -> Self {
        let mut index = Self::default();
        for dist in dists {
            index.insert(dist);
        }
        index
    }

    /// Enumerate and parse every installed distribution under the given
    /// site-packages directories.
    ///
    /// Metadata that fails to parse is logged and skipped; a single broken
    /// package never aborts the run.
    pub fn discover(site_packages: &[PathBuf]) -> Result<Self, PiptreeError> {
        let mut index = Self::default();
        for dir in site_packages {
            for info_dir in dist_info_dirs(dir) {
                match load_distribution(&info_dir) {
                    Ok(dist) => index.insert(dist),
                    Err(err) => {
                        warn!(path = %info_dir.display(), %err, "skipping unreadable package metadata");
                    }
                }
            }
        }
        Ok(index)
    }

    fn insert(&mut self, dist: Distribution) {
        if self.by_key.contains_key(&dist.key) {
            debug!(key = %dist.key, "duplicate distribution shadowed by earlier site-packages entry");
            return;
        }
        self.by_key.insert(dist.key.clone(), self.distributions.len());
        self.distributions.push(dist);
    }

    /// Look up a distribution by normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Distribution> {
        self.by_key.get(key).map(|&i| &self.distributions[i])
    }

    /// Installed version of a package, by normalized key.
    #[must_use]
    pub fn installed_version(&self, key: &str) -> Option<&str> {
        self.get(key).map(|d| d.version.as_str())
    }

    /// Iterate distributions in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &Distribution> {
        self.distributions.iter()
    }

    /// Number of indexed distributions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    /// Whether the index holds no distributions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}

/// Collect `*.dist-info` directories one level under a site-packages
/// directory, sorted by name for deterministic enumeration.
fn dist_info_dirs(site_packages: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(site_packages)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".dist-info"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    dirs.sort();
    dirs
}

/// Load one distribution from its `.dist-info` directory.
fn load_distribution(info_dir: &Path) -> Result<Distribution, PiptreeError> {
    let metadata_path = info_dir.join("METADATA");
    let content = std::fs::read_to_string(&metadata_path)?;
    let mut dist = Distribution::from_metadata(&metadata_path.display().to_string(), &content)?;
    dist.editable_url = editable_url(info_dir);
    Ok(dist)
}

/// Extract the source URL when `direct_url.json` marks an editable install.
fn editable_url(info_dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(info_dir.join("direct_url.json")).ok()?;
    let record: JsonValue = serde_json::from_str(&content).ok()?;
    let editable = record
        .get("dir_info")
        .and_then(|d| d.get("editable"))
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);
    if !editable {
        return None;
    }
    record.get("url").and_then(JsonValue::as_str).map(ToString::to_string)
}
