//! Global constants used throughout the piptree codebase.
//!
//! This module contains traversal budgets, sentinel values, and other
//! numeric constants that are used across multiple modules. Defining
//! them centrally improves maintainability and makes magic numbers
//! more discoverable.

/// Maximum recursion depth along any single dependency branch.
///
/// Package metadata is not guaranteed acyclic or even sane; the depth
/// ceiling guarantees termination against pathological requirement
/// chains regardless of what the path-based cycle detection catches.
pub const MAX_TRAVERSAL_DEPTH: usize = 200;

/// Maximum number of dependency nodes constructed in a single run.
///
/// This counter accumulates across all root traversals, bounding total
/// work rather than per-root work. When the ceiling is reached, nodes
/// are still emitted but their subtrees are truncated to empty.
pub const MAX_TRAVERSED_NODES: usize = 10_000;

/// Default output filename for the dependency forest document.
pub const DEFAULT_OUTPUT_FILE: &str = "piptree.json";

/// Sentinel version for packages installed without a discoverable pin.
///
/// Preserved byte-for-byte in output; downstream consumers distinguish
/// this from an actual blank or unknown version.
pub const LATEST_VERSION: &str = "latest";

/// The extra name whose entries are expanded into full nested
/// dependency entries during forest construction.
pub const ALL_EXTRA: &str = "all";
