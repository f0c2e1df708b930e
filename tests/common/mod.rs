//! Shared test fixtures: build throwaway site-packages trees on disk.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary site-packages directory populated with `.dist-info` records.
pub struct SitePackagesFixture {
    _tmp: TempDir,
    site: PathBuf,
}

impl SitePackagesFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create tempdir");
        let site = tmp.path().join("site-packages");
        std::fs::create_dir_all(&site).expect("create site-packages");
        Self { _tmp: tmp, site }
    }

    /// The site-packages directory to point the resolver at.
    pub fn path(&self) -> &Path {
        &self.site
    }

    /// The fixture root, usable as a working directory.
    pub fn root(&self) -> &Path {
        self._tmp.path()
    }

    /// A scratch path outside site-packages, for output documents.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self._tmp.path().join(name)
    }

    /// Add an installed package with the given requirements and extras.
    pub fn add_package(&self, name: &str, version: &str, requires: &[&str], extras: &[&str]) {
        let info = self.site.join(format!("{name}-{version}.dist-info"));
        std::fs::create_dir_all(&info).expect("create dist-info");

        let mut metadata = format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n");
        for req in requires {
            metadata.push_str(&format!("Requires-Dist: {req}\n"));
        }
        for extra in extras {
            metadata.push_str(&format!("Provides-Extra: {extra}\n"));
        }
        metadata.push_str("\nLong description body.\n");
        std::fs::write(info.join("METADATA"), metadata).expect("write METADATA");
    }

    /// Add an editable install backed by the given source URL.
    pub fn add_editable_package(&self, name: &str, version: &str, url: &str) {
        self.add_package(name, version, &[], &[]);
        let info = self.site.join(format!("{name}-{version}.dist-info"));
        let direct_url = format!(r#"{{"url": "{url}", "dir_info": {{"editable": true}}}}"#);
        std::fs::write(info.join("direct_url.json"), direct_url).expect("write direct_url.json");
    }
}
