//! Recursive dependency-tree expansion.
//!
//! The requirement relation over installed packages is a general graph that
//! may contain cycles, discovered lazily: each node's children are computed
//! on demand from its recorded requirement list intersected with what is
//! actually installed. The walker expands that graph into trees, with three
//! guardrails:
//!
//! - an explicit branch path for cycle detection (no reliance on stack
//!   overflow as a safety net),
//! - a per-branch depth budget threaded as an argument,
//! - a run-wide node budget shared through [`ResolverContext`].
//!
//! Cycles and exhausted budgets truncate subtrees; they never fail the run.

use tracing::{debug, warn};

use crate::metadata::{MetadataIndex, Requirement};
use crate::models::{DependencyNode, purl};
use crate::resolver::ResolverContext;
use crate::resolver::extras::extras_for;

/// Expands requirement lists into dependency trees against one
/// [`MetadataIndex`].
pub struct GraphWalker<'a> {
    index: &'a MetadataIndex,
}

impl<'a> GraphWalker<'a> {
    /// Create a walker over the given index.
    #[must_use]
    pub fn new(index: &'a MetadataIndex) -> Self {
        Self { index }
    }

    /// Expand `requirements` into an ordered list of dependency nodes.
    ///
    /// `path` is the ordered sequence of package keys on the current
    /// root-to-node branch; each recursion extends a copy, so sibling
    /// branches never observe each other's entries. `depth_remaining`
    /// counts down to zero, at which point subtrees are emitted empty.
    ///
    /// Output order follows the input requirement order; requirements whose
    /// target is not installed are skipped, and requirements whose target is
    /// already on `path` are reported as cycles and excluded at this
    /// position.
    pub fn walk(
        &self,
        ctx: &mut ResolverContext,
        path: &[String],
        requirements: &[&Requirement],
        depth_remaining: usize,
    ) -> Vec<DependencyNode> {
        let mut nodes = Vec::new();
        for req in requirements {
            let Some(dist) = self.index.get(&req.key) else {
                debug!(requirement = %req.name, "target not installed, skipping");
                continue;
            };

            if let Some(first) = path.iter().position(|key| key == &req.key) {
                let branch = path[first..].join(" -> ");
                warn!(cycle = %format!("{branch} -> {}", req.key), "dependency cycle, pruning");
                continue;
            }

            let mut current_path = path.to_vec();
            current_path.push(req.key.clone());

            ctx.record_visit();
            let extra_deps = extras_for(ctx, dist);
            let child_requirements = dist.base_requirements();
            let dependencies = if child_requirements.is_empty() {
                Vec::new()
            } else if depth_remaining == 0 || ctx.budget_exhausted() {
                warn!(package = %dist.name, "traversal budget reached, emitting truncated subtree");
                Vec::new()
            } else {
                self.walk(ctx, &current_path, &child_requirements, depth_remaining - 1)
            };

            nodes.push(DependencyNode {
                // The installed record's canonical name wins over whatever
                // the requirement declared.
                name: dist.name.clone(),
                version: dist.version.clone(),
                version_specifiers: Some(req.format_specifiers()),
                purl: purl(&dist.name, &dist.version),
                extra_deps,
                dependencies,
            });
        }
        nodes
    }
}
