//! Forest construction and root-set derivation.
//!
//! Every installed package gets a full dependency tree; only the trees of
//! packages nobody else *directly* depends on survive as roots. The
//! membership test is shallow: a package is relegated to
//! nested-only status as soon as it appears as a direct child of any other
//! candidate tree, not when it merely appears somewhere in a deeper
//! position. Downstream consumers depend on this exact shape.

use std::collections::HashSet;
use tracing::info;

use crate::metadata::MetadataIndex;
use crate::metadata::frozen::{frozen_requirement, parse_frozen};
use crate::models::{DependencyNode, purl};
use crate::resolver::extras::{extras_for, resolve_extra_dependencies};
use crate::resolver::walker::GraphWalker;
use crate::resolver::ResolverContext;

/// Builds the dependency forest for one installed environment.
pub struct ForestBuilder<'a> {
    index: &'a MetadataIndex,
}

impl<'a> ForestBuilder<'a> {
    /// Create a builder over the given index.
    #[must_use]
    pub fn new(index: &'a MetadataIndex) -> Self {
        Self { index }
    }

    /// Build the forest: one tree per root package, in enumeration order.
    pub fn build(&self, ctx: &mut ResolverContext) -> Vec<DependencyNode> {
        let walker = GraphWalker::new(self.index);
        let depth_budget = ctx.config().max_depth.saturating_sub(1);

        let mut candidates = Vec::with_capacity(self.index.len());
        for dist in self.index.iter() {
            let frozen = frozen_requirement(dist);
            let (name, version) = parse_frozen(&frozen, dist);

            let path = vec![dist.key.clone()];
            let mut dependencies =
                walker.walk(ctx, &path, &dist.base_requirements(), depth_budget);

            let extra_deps = extras_for(ctx, dist);
            dependencies.extend(resolve_extra_dependencies(
                ctx,
                self.index,
                &extra_deps,
                depth_budget,
            ));

            candidates.push(DependencyNode {
                purl: purl(&name, &version),
                name,
                version,
                version_specifiers: None,
                extra_deps,
                dependencies,
            });
        }

        // Shallow direct-child membership, not reachability: only names that
        // appear as an immediate child of some candidate disqualify a root.
        let direct_children: HashSet<&str> = candidates
            .iter()
            .flat_map(|tree| tree.dependencies.iter())
            .map(|child| child.name.as_str())
            .collect();

        let forest: Vec<DependencyNode> = candidates
            .iter()
            .filter(|tree| !direct_children.contains(tree.name.as_str()))
            .cloned()
            .collect();

        info!(
            packages = self.index.len(),
            roots = forest.len(),
            nodes = ctx.nodes_visited(),
            "dependency forest resolved"
        );
        forest
    }
}
