//! piptree CLI entry point
//!
//! Parses the single optional output-path argument, runs the resolver over
//! the discovered Python environment, and writes the dependency forest.
//! Errors are rendered with context and suggestions before exiting non-zero.

use anyhow::Result;
use clap::Parser;
use piptree::cli::Cli;
use piptree::core::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the resolver
    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
