//! Dependency-forest resolution.
//!
//! The resolver turns the flat set of installed distributions into a forest
//! of dependency trees:
//!
//! 1. [`extras`] precomputes, per package, which dependencies each declared
//!    extra activates (cached for the whole run).
//! 2. [`walker`] expands a package's requirement list into a tree, detecting
//!    cycles against the current branch path and enforcing traversal budgets.
//! 3. [`forest`] runs the walker over every installed package and keeps only
//!    the trees nobody else directly depends on.
//!
//! All run-wide shared state (the extras cache and the traversal-count
//! budget) lives in an explicit [`ResolverContext`] threaded through every
//! call, so concurrent runs or tests never interfere through ambient state.

pub mod extras;
pub mod forest;
pub mod walker;

pub use forest::ForestBuilder;
pub use walker::GraphWalker;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::{MAX_TRAVERSAL_DEPTH, MAX_TRAVERSED_NODES};
use crate::models::ExtrasMap;

/// Tunables for one resolver run.
///
/// The budgets exist purely to guarantee termination and bounded work
/// against pathological metadata (self-referential extras, long requirement
/// cycles), not to express a domain limit.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum recursion depth along any single branch.
    pub max_depth: usize,
    /// Maximum number of nodes constructed across the whole run.
    pub max_nodes: usize,
    /// Explicit site-packages directories, tried before environment
    /// discovery. Mainly for tests and embedding callers.
    pub site_packages: Vec<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_TRAVERSAL_DEPTH,
            max_nodes: MAX_TRAVERSED_NODES,
            site_packages: Vec::new(),
        }
    }
}

/// Run-wide mutable state shared across all root traversals.
///
/// The extras cache amortizes repeated extras computation for shared
/// dependencies; the visit counter accumulates across roots so the budget
/// bounds total work, not per-root work.
#[derive(Debug)]
pub struct ResolverContext {
    config: ResolverConfig,
    extras_cache: HashMap<String, ExtrasMap>,
    nodes_visited: usize,
}

impl ResolverContext {
    /// Create a fresh context for one run.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            extras_cache: HashMap::new(),
            nodes_visited: 0,
        }
    }

    /// The configuration this run operates under.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Whether the global node budget has been exhausted.
    #[must_use]
    pub fn budget_exhausted(&self) -> bool {
        self.nodes_visited >= self.config.max_nodes
    }

    /// Total nodes constructed so far in this run.
    #[must_use]
    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    pub(crate) fn record_visit(&mut self) {
        self.nodes_visited += 1;
    }

    pub(crate) fn cached_extras(&self, purl: &str) -> Option<&ExtrasMap> {
        self.extras_cache.get(purl)
    }

    pub(crate) fn cache_extras(&mut self, purl: String, extras: ExtrasMap) {
        self.extras_cache.insert(purl, extras);
    }
}
