//! Installed distribution records parsed from core metadata.
//!
//! A `METADATA` file is RFC-822 style: `Key: value` header lines, optionally
//! folded with indented continuation lines, terminated by the first blank
//! line (everything after is the long description). The resolver needs four
//! keys: `Name`, `Version`, `Requires-Dist` (repeating) and `Provides-Extra`
//! (repeating).

use crate::core::PiptreeError;
use crate::metadata::normalize_package_key;
use crate::metadata::requirement::Requirement;
use tracing::debug;

/// An installed package record.
///
/// Immutable once loaded; owned exclusively by the
/// [`MetadataIndex`](crate::metadata::MetadataIndex) for the duration of one
/// resolver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Normalized package key, the lookup identity.
    pub key: String,
    /// Canonical display name from the `Name` field.
    pub name: String,
    /// Recorded version; empty when the metadata carries none.
    pub version: String,
    /// All declared requirements, in declaration order.
    pub requirements: Vec<Requirement>,
    /// Declared extra names, in declaration order.
    pub provides_extras: Vec<String>,
    /// Source URL when this is an editable install (from `direct_url.json`).
    pub editable_url: Option<String>,
}

impl Distribution {
    /// Parse a core `METADATA` document.
    ///
    /// `origin` is used for error reporting only. Fails only when no `Name`
    /// can be recovered; every other field degrades to empty.
    pub fn from_metadata(origin: &str, content: &str) -> Result<Self, PiptreeError> {
        let mut name = None;
        let mut version = String::new();
        let mut requirements = Vec::new();
        let mut provides_extras = Vec::new();

        for (field, value) in header_fields(content) {
            match field.as_str() {
                "name" => name = Some(value),
                "version" => version = value,
                "requires-dist" => match Requirement::parse(&value) {
                    Some(req) => requirements.push(req),
                    None => {
                        debug!(origin, entry = %value, "dropping unparseable Requires-Dist entry");
                    }
                },
                "provides-extra" => provides_extras.push(value),
                _ => {}
            }
        }

        let name = name.filter(|n| !n.is_empty()).ok_or_else(|| PiptreeError::MetadataParse {
            path: origin.to_string(),
            reason: "missing Name field".to_string(),
        })?;

        Ok(Self {
            key: normalize_package_key(&name),
            name,
            version,
            requirements,
            provides_extras,
            editable_url: None,
        })
    }

    /// Requirements that are unconditional with respect to extras.
    ///
    /// These are the edges the graph walk follows; extra-gated requirements
    /// only materialize through the extras resolver.
    #[must_use]
    pub fn base_requirements(&self) -> Vec<&Requirement> {
        self.requirements.iter().filter(|r| !r.references_extra()).collect()
    }
}

/// Iterate `(lowercased-field, value)` pairs of the header block.
fn header_fields(content: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            // Folded continuation of the previous field.
            if let Some((_, value)) = fields.last_mut() {
                value.push(' ');
                value.push_str(line.trim());
            }
            continue;
        }
        if let Some((field, value)) = line.split_once(':') {
            fields.push((field.trim().to_lowercase(), value.trim().to_string()));
        }
    }
    fields
}
