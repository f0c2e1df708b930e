//! Extra-feature resolution.
//!
//! For each package this module answers: which dependencies does each
//! declared extra activate? A requirement is placed under extra `E` iff its
//! marker evaluates true with `extra = E`. The resulting map is memoized by
//! purl for the lifetime of the run: the same library is a dependency of
//! dozens of roots and its extras must be computed once.
//!
//! A second pass expands the conventional `all` extra: entries under `all`
//! that resolve to an installed package are materialized into full nested
//! dependency entries; entries that do not resolve are silently dropped.
//! This is best-effort enrichment, not a correctness-critical path.

use crate::constants::ALL_EXTRA;
use crate::markers;
use crate::metadata::{Distribution, MetadataIndex, normalize_package_key};
use crate::models::{DependencyNode, ExtraDependency, ExtrasMap, purl};
use crate::resolver::ResolverContext;

/// The extras map for a distribution, computed once and cached by purl.
pub fn extras_for(ctx: &mut ResolverContext, dist: &Distribution) -> ExtrasMap {
    let id = purl(&dist.name, &dist.version);
    if let Some(cached) = ctx.cached_extras(&id) {
        return cached.clone();
    }
    let extras = compute_extras(dist);
    ctx.cache_extras(id, extras.clone());
    extras
}

/// Group a distribution's extra-gated requirements under the extras that
/// activate them.
fn compute_extras(dist: &Distribution) -> ExtrasMap {
    let mut map = ExtrasMap::new();
    for req in &dist.requirements {
        let Some(marker) = req.marker.as_deref() else {
            continue;
        };
        if !markers::references_extra(marker) {
            continue;
        }
        for extra in &dist.provides_extras {
            if markers::evaluate(marker, extra) {
                map.entry(extra.clone()).or_default().push(ExtraDependency {
                    name: req.name.clone(),
                    version_specifiers: req.format_specifiers(),
                    url: req.url.clone(),
                });
            }
        }
    }
    map
}

/// Expand the `all` extra of an extras map into full dependency entries.
///
/// Each entry is looked up against the installed environment; hits become
/// complete nested nodes carrying their own extras and, recursively, their
/// own `all` expansion. Misses are dropped without comment. Shares the
/// run's depth and node budgets so self-referential `all` extras terminate.
pub fn resolve_extra_dependencies(
    ctx: &mut ResolverContext,
    index: &MetadataIndex,
    extras: &ExtrasMap,
    depth_remaining: usize,
) -> Vec<DependencyNode> {
    let mut nodes = Vec::new();
    let Some(entries) = extras.get(ALL_EXTRA) else {
        return nodes;
    };
    for entry in entries {
        let Some(dist) = index.get(&normalize_package_key(&entry.name)) else {
            continue;
        };
        ctx.record_visit();
        let node_extras = extras_for(ctx, dist);
        let dependencies = if depth_remaining == 0 || ctx.budget_exhausted() {
            Vec::new()
        } else {
            resolve_extra_dependencies(ctx, index, &node_extras, depth_remaining - 1)
        };
        nodes.push(DependencyNode {
            name: dist.name.clone(),
            version: dist.version.clone(),
            version_specifiers: Some(entry.version_specifiers.clone()),
            purl: purl(&dist.name, &dist.version),
            extra_deps: node_extras,
            dependencies,
        });
    }
    nodes
}
