//! Requirement parsing for `Requires-Dist` metadata entries.
//!
//! Entries follow the PEP 508 shape the resolver cares about:
//!
//! ```text
//! name[extras] (>=1.0,<2.0) ; marker
//! name @ https://example.com/pkg.tar.gz ; marker
//! ```
//!
//! Parsing is tolerant: a clause that does not look like a
//! specifier is skipped, and an entry without a recognizable name is dropped
//! by the caller. Malformed metadata degrades a single edge, never the run.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::markers;
use crate::metadata::normalize_package_key;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[([^\]]*)\])?").expect("valid regex")
});

static CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(===|==|!=|<=|>=|~=|<|>)\s*(.+)$").expect("valid regex"));

/// A single version-specifier clause, e.g. `>=` + `2.8.1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecifierClause {
    /// Comparison operator (`==`, `!=`, `<=`, `>=`, `<`, `>`, `~=`, `===`).
    pub op: String,
    /// Version the operator compares against.
    pub version: String,
}

/// An edge specification extracted from a distribution's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Target package name as declared.
    pub name: String,
    /// Normalized lookup key for the target package.
    pub key: String,
    /// Extras requested of the target (`requests[security]`).
    pub extras: Vec<String>,
    /// Ordered version-specifier clauses.
    pub specifiers: Vec<SpecifierClause>,
    /// Direct URL when the `name @ url` form is used.
    pub url: Option<String>,
    /// Raw marker expression, when present.
    pub marker: Option<String>,
}

impl Requirement {
    /// Parse a single `Requires-Dist` value.
    ///
    /// Returns `None` when no package name can be extracted; the entry is
    /// unusable as a graph edge and the caller drops it.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (head, marker) = match input.split_once(';') {
            Some((head, marker)) => (head.trim(), Some(marker.trim().to_string())),
            None => (input.trim(), None),
        };
        let marker = marker.filter(|m| !m.is_empty());

        let captures = NAME_RE.captures(head)?;
        let name = captures.get(1).map(|m| m.as_str().to_string())?;
        let extras = captures
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let rest = head[captures.get(0).map_or(0, |m| m.end())..].trim();

        let mut url = None;
        let mut specifiers = Vec::new();
        if let Some(target) = rest.strip_prefix('@') {
            url = Some(target.trim().to_string());
        } else if !rest.is_empty() {
            // Older metadata wraps specifier lists in parentheses.
            let rest = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')).unwrap_or(rest);
            for clause in rest.split(',') {
                let clause = clause.trim();
                if clause.is_empty() {
                    continue;
                }
                match CLAUSE_RE.captures(clause) {
                    Some(parts) => specifiers.push(SpecifierClause {
                        op: parts[1].to_string(),
                        version: parts[2].trim().to_string(),
                    }),
                    None => {
                        debug!(requirement = %name, clause, "skipping unrecognized specifier clause");
                    }
                }
            }
        }

        let key = normalize_package_key(&name);
        Some(Self {
            name,
            key,
            extras,
            specifiers,
            url,
            marker,
        })
    }

    /// Render the specifier clauses as the single display string used in
    /// output documents.
    ///
    /// Clauses are sorted in reverse lexical `(op, version)` order and
    /// comma-joined. The ordering is a cosmetically arbitrary but stable
    /// convention that downstream consumers rely on.
    #[must_use]
    pub fn format_specifiers(&self) -> String {
        let mut clauses = self.specifiers.clone();
        clauses.sort();
        clauses.reverse();
        clauses
            .iter()
            .map(|c| format!("{}{}", c.op, c.version))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether this requirement is gated behind an extra.
    #[must_use]
    pub fn references_extra(&self) -> bool {
        self.marker.as_deref().is_some_and(markers::references_extra)
    }
}
