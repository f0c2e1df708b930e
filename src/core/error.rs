//! Error handling for piptree.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`PiptreeError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for CLI users
//!
//! Most failure modes in the resolver are not errors at all: a
//! requirement pointing at an uninstalled package, a dependency cycle, or an
//! exhausted traversal budget all degrade the affected subtree and let the
//! run continue. The variants below cover the conditions that can actually
//! surface to a caller: unreadable environments, malformed metadata, and
//! the one fatal case, failing to write the output document.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for piptree operations.
#[derive(Error, Debug)]
pub enum PiptreeError {
    /// No installed distributions were found in any candidate directory.
    ///
    /// Raised after discovery when every site-packages candidate was either
    /// missing or empty. Per-package problems never raise this; it means
    /// there was no input at all.
    #[error("no installed Python packages found ({searched} site-packages directories searched)")]
    EnvironmentNotFound {
        /// Number of candidate directories that were scanned.
        searched: usize,
    },

    /// A `METADATA` document could not be parsed into a distribution.
    ///
    /// Callers treat this as per-package: the record is skipped and the run
    /// continues with the rest of the environment.
    #[error("invalid package metadata in {path}: {reason}")]
    MetadataParse {
        /// Path of the offending metadata file.
        path: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The output document could not be written. Fatal; the process exits
    /// non-zero.
    #[error("failed to write output document {path}")]
    OutputWrite {
        /// Destination path of the document.
        path: String,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error during metadata enumeration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wrapper that adds a user-facing suggestion and details to an error.
///
/// Built by [`user_friendly_error`] just before the CLI exits, so library
/// callers keep working with plain typed errors.
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// A short, actionable suggestion for resolving the problem.
    pub suggestion: Option<String>,
    /// Additional background details.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with color when attached to a terminal.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".yellow(), cause);
        }
        if let Some(details) = &self.details {
            eprintln!("\n{details}");
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{} {}", "hint:".cyan().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`] with contextual
/// suggestions for the known failure modes.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<PiptreeError>() {
        Some(PiptreeError::EnvironmentNotFound { .. }) => Some(
            "Activate the virtual environment you want scanned (VIRTUAL_ENV), or point \
             PYTHONPATH or PIP_TARGET at a site-packages directory",
        ),
        Some(PiptreeError::OutputWrite { .. }) => {
            Some("Check that the output directory exists and is writable")
        }
        Some(PiptreeError::Io(_)) => Some("Check file permissions on the scanned directories"),
        _ => None,
    };
    let mut ctx = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        ctx = ctx.with_suggestion(suggestion);
    }
    ctx
}
