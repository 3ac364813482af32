//! Candidate path resolution.

use crate::error::{ConfigError, Result};
use crate::fs::absolutize;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `${NAME}` or `$NAME`; a `$` followed by anything else is left alone.
static ENV_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]*)\}|\$([A-Za-z0-9_]+)").expect("Invalid env reference regex")
});

/// Expand `$NAME` and `${NAME}` references from the process environment.
///
/// Unset (or non-Unicode) variables expand to an empty string.
///
/// ```
/// let home = std::env::var("HOME").unwrap_or_default();
/// assert_eq!(yamlcfg::expand_env("$HOME/.app"), format!("{}/.app", home));
/// assert_eq!(yamlcfg::expand_env("cost: $"), "cost: $");
/// ```
pub fn expand_env(input: &str) -> String {
    ENV_REF_REGEX
        .replace_all(input, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            std::env::var(name).unwrap_or_default()
        })
        .into_owned()
}

/// Expand and absolutize a single candidate.
pub(crate) fn candidate_path(candidate: &str) -> Result<PathBuf> {
    let expanded = expand_env(candidate);
    absolutize(Path::new(&expanded))
        .map_err(|e| ConfigError::io("failed to resolve config path", expanded, e))
}

/// Return the first candidate that exists, as an absolute path.
///
/// `Ok(None)` means no candidate exists; an empty candidate list is an
/// [`ConfigError::InvalidInput`] error.
pub fn resolve_path<S: AsRef<str>>(candidates: &[S]) -> Result<Option<PathBuf>> {
    if candidates.is_empty() {
        return Err(ConfigError::InvalidInput);
    }

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let path = candidate_path(candidate)?;
        if path.exists() {
            tracing::debug!(candidate, path = %path.display(), "found config file");
            return Ok(Some(path));
        }
        tracing::trace!(candidate, path = %path.display(), "config candidate missing");
    }

    Ok(None)
}
