//! Frozen-requirement synthesis and pinned-version recovery.
//!
//! A frozen requirement is the `pip freeze` rendering of an installed
//! package: `name==version` for a normal install, `-e <url>#egg=<name>` for
//! an editable one. The resolver synthesizes the string from the metadata
//! store and then recovers `(name, version)` from it, so the recovery path
//! also stays robust against strings produced by foreign freezers
//! (`# Editable ...` banners, egg fragments, missing pins).

use crate::constants::LATEST_VERSION;
use crate::metadata::Distribution;

/// Render the frozen-requirement string for an installed distribution.
#[must_use]
pub fn frozen_requirement(dist: &Distribution) -> String {
    if let Some(url) = &dist.editable_url {
        if url.contains("#egg=") {
            return format!("-e {url}");
        }
        return format!("-e {url}#egg={}", dist.name);
    }
    if dist.version.is_empty() {
        return dist.name.clone();
    }
    format!("{}=={}", dist.name, dist.version)
}

/// Recover `(name, version)` from a frozen-requirement string.
///
/// Recovery order:
/// 1. `# Editable ...` banners carry no usable pair; the distribution's own
///    key and recorded version win.
/// 2. A `name==version` pair is split apart. `-e` prefixed names take the
///    project name from the `#egg=` URL fragment, truncated at the first
///    space or `&`.
/// 3. Without a `==` pair the distribution's recorded version is used.
/// 4. When nothing resolves, the version is the `"latest"` sentinel,
///    preserved byte-for-byte so downstream consumers can tell "installed
///    without a discoverable pin" from an unknown version.
#[must_use]
pub fn parse_frozen(frozen: &str, dist: &Distribution) -> (String, String) {
    if frozen.starts_with("# Editable") {
        let version = if dist.version.is_empty() {
            LATEST_VERSION.to_string()
        } else {
            dist.version.clone()
        };
        return (dist.key.clone(), version);
    }

    let parts: Vec<&str> = frozen.split("==").collect();
    let mut name = parts[0].to_string();
    if name.starts_with("-e") {
        name = name
            .rsplit("#egg=")
            .next()
            .unwrap_or_default()
            .split(' ')
            .next()
            .unwrap_or_default()
            .split('&')
            .next()
            .unwrap_or_default()
            .to_string();
    }

    let version = match parts.len() {
        2 => parts[1].to_string(),
        1 if !dist.version.is_empty() => dist.version.clone(),
        _ => LATEST_VERSION.to_string(),
    };

    let name = name.split(' ').next().unwrap_or_default().to_string();
    (name, version)
}
