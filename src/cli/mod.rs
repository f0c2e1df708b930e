//! Command-line interface for piptree.
//!
//! The surface is intentionally tiny: one optional positional argument, the
//! output file path. Everything else (which environment to scan, log
//! verbosity) is taken from the process environment (`VIRTUAL_ENV`,
//! `PYTHONPATH`, `PIP_TARGET`, `RUST_LOG`), matching how the tool is driven
//! by the BOM generator that consumes its output.
//!
//! ```bash
//! piptree                      # writes ./piptree.json
//! piptree /tmp/deps.json       # writes the given path
//! RUST_LOG=debug piptree       # show skipped requirements and cache hits
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_OUTPUT_FILE;
use crate::core::PiptreeError;
use crate::environment;
use crate::metadata::MetadataIndex;
use crate::output;
use crate::resolver::{ForestBuilder, ResolverConfig, ResolverContext};

/// Main CLI application structure for piptree.
#[derive(Parser, Debug)]
#[command(
    name = "piptree",
    about = "Resolve the dependency forest of an installed Python environment",
    version,
    author,
    long_about = "Reads the metadata store of an installed Python environment and writes \
                  the per-root dependency forest as a JSON document for BOM generation."
)]
pub struct Cli {
    /// Output file path for the dependency forest document.
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
}

impl Cli {
    /// Execute the resolver with the default configuration.
    pub fn execute(self) -> Result<()> {
        init_logging();
        run(&self.output, ResolverConfig::default())
    }
}

/// Initialise the tracing subscriber once, writing to stderr.
///
/// Defaults to `warn` so cycle reports and truncations surface without
/// polluting scripted invocations; `RUST_LOG` overrides.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Resolve the forest for the discovered environment and write it out.
///
/// Exposed separately from [`Cli::execute`] so tests and embedding callers
/// can inject a configuration.
pub fn run(output: &Path, config: ResolverConfig) -> Result<()> {
    let dirs = environment::site_packages_dirs(&config.site_packages);
    let index = MetadataIndex::discover(&dirs)?;
    if index.is_empty() {
        return Err(PiptreeError::EnvironmentNotFound {
            searched: dirs.len(),
        }
        .into());
    }
    info!(packages = index.len(), "resolving dependency forest");

    let mut ctx = ResolverContext::new(config);
    let forest = ForestBuilder::new(&index).build(&mut ctx);
    output::write_document(output, &forest)?;
    info!(roots = forest.len(), path = %output.display(), "wrote dependency forest");
    Ok(())
}
