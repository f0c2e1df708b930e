//! piptree - installed-package dependency-forest resolver
//!
//! Reads the metadata store of a Python runtime environment (every installed
//! package's declared requirements, version constraints, and conditional
//! "extra" requirement groups) and builds a forest of dependency trees: one
//! tree per top-level package, covering its full transitive closure. The
//! forest is written as a JSON document consumed by a downstream
//! bill-of-materials generator.
//!
//! # Architecture Overview
//!
//! The underlying dependency relation is a general graph that may contain
//! cycles, discovered lazily from requirement lists intersected with what is
//! actually installed. Resolution is a single-threaded, depth-first pipeline:
//!
//! 1. [`environment`] discovers the site-packages directories to scan
//! 2. [`metadata`] enumerates installed distributions and indexes them by
//!    normalized package key
//! 3. [`resolver`] expands each package into a dependency tree (extras
//!    gating via [`markers`], cycle detection against an explicit branch
//!    path, depth and node budgets for guaranteed termination), then keeps
//!    only the trees nobody else directly depends on
//! 4. [`output`] writes the forest atomically
//!
//! # Key Properties
//!
//! - **Degrades gracefully**: uninstalled requirements, cycles, exhausted
//!   budgets, and unparseable single packages truncate locally; only a
//!   failed output write aborts the run
//! - **Deterministic**: repeated runs over an unchanged environment produce
//!   identical documents
//! - **No ambient state**: the extras cache and traversal budget live in an
//!   explicit [`resolver::ResolverContext`] threaded through every call
//!
//! # Example
//!
//! ```rust,no_run
//! use piptree::metadata::MetadataIndex;
//! use piptree::resolver::{ForestBuilder, ResolverConfig, ResolverContext};
//!
//! # fn main() -> anyhow::Result<()> {
//! let index = MetadataIndex::discover(&[".venv/lib/python3.12/site-packages".into()])?;
//! let mut ctx = ResolverContext::new(ResolverConfig::default());
//! let forest = ForestBuilder::new(&index).build(&mut ctx);
//! println!("{}", piptree::output::to_json(&forest)?);
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod cli;
pub mod constants;
pub mod core;
pub mod resolver;

// Environment introspection
pub mod environment;
pub mod metadata;

// Requirement semantics
pub mod markers;

// Supporting modules
pub mod models;
pub mod output;
pub mod utils;
