//! Shared data models for the resolver output
//!
//! This module provides the output-facing data structures produced by the
//! resolver: dependency tree nodes, extra-gated dependency entries, and
//! package URL construction. All types serialize directly into the shape
//! consumed by the downstream bill-of-materials generator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from extra-feature name to the dependencies gated by that extra.
///
/// A `BTreeMap` keeps serialization order deterministic across runs.
pub type ExtrasMap = BTreeMap<String, Vec<ExtraDependency>>;

/// A dependency entry gated by a specific extra.
///
/// Grouped under its extra's name inside an [`ExtrasMap`]. Unlike
/// [`DependencyNode`], these entries are not resolved against the installed
/// environment at construction time; they record what the declaring package
/// asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraDependency {
    /// Target package name as declared in the requirement.
    pub name: String,
    /// Formatted version-specifier clauses (may be empty).
    #[serde(rename = "versionSpecifiers")]
    pub version_specifiers: String,
    /// Direct URL when the requirement uses the `name @ url` form.
    pub url: Option<String>,
}

/// A node in the dependency forest.
///
/// Constructed bottom-up during traversal and never mutated afterwards. The
/// same node value may legitimately appear as a descendant of multiple
/// parents; the forest is a DAG of node values, not of identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Canonical project name (the installed record's name wins over the
    /// name declared by the requirement that led here).
    pub name: String,
    /// Installed version, or the `"latest"` sentinel for root packages
    /// without a discoverable frozen pin.
    pub version: String,
    /// Formatted specifier clauses of the requirement edge that produced
    /// this node. Absent on root entries, which are not reached via any
    /// requirement.
    #[serde(rename = "versionSpecifiers", skip_serializing_if = "Option::is_none")]
    pub version_specifiers: Option<String>,
    /// Package URL, the join key for downstream consumers.
    pub purl: String,
    /// This package's own extra-gated dependencies.
    pub extra_deps: ExtrasMap,
    /// Transitive dependencies, in requirement declaration order.
    pub dependencies: Vec<DependencyNode>,
}

/// Build the canonical package URL for a pypi package.
///
/// The name is lowercased, the version is carried unchanged:
/// `pkg:pypi/django@4.2.1`.
#[must_use]
pub fn purl(name: &str, version: &str) -> String {
    format!("pkg:pypi/{}@{}", name.to_lowercase(), version)
}
