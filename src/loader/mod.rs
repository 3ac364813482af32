//! The config loading pipeline.
//!
//! `load_config` runs these stages in order and stops at the first error:
//!
//! 1. **Resolve** - expand env references in each candidate, make it
//!    absolute, pick the first that exists
//! 2. **Materialize** - if none exists, write the target's default config to
//!    the *first* candidate
//! 3. **Read** - load the file, rejecting empty files
//! 4. **Render** - if the target exposes secrets, render it as a template
//! 5. **Decode** - merge the YAML document into the target
//! 6. **Hooks** - report the resolved path, then validate
//!
//! # Concurrency
//!
//! Loading is synchronous and keeps no state between calls. Two processes
//! materializing the same default file at the same moment are not
//! coordinated: the file is created with create-new semantics, so one of
//! them wins and the other gets an I/O error (`AlreadyExists`).

mod decode;
mod resolve;


pub use resolve::{expand_env, resolve_path};

use crate::capability::Configurable;
use crate::error::{ConfigError, Result};
use crate::fs::{create_dir_tree, write_new_file};
use crate::template;
use std::borrow::Cow;
use std::path::PathBuf;

/// Default mode for directories created for a default config.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default mode for a materialized default config file.
pub const DEFAULT_FILE_MODE: u32 = 0o600;

/// Loader settings.
///
/// `load_config` uses `Loader::default()`; build one by hand to change the
/// permissions used when a default config is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loader {
    /// Mode for directories created on the way to the default config.
    pub dir_mode: u32,
    /// Mode for the default config file itself.
    pub file_mode: u32,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl Loader {
    /// Load the first existing candidate into `target`.
    ///
    /// See the [module documentation](self) for the stages.
    pub fn load<S, T>(&self, candidates: &[S], target: &mut T) -> Result<()>
    where
        S: AsRef<str>,
        T: Configurable,
    {
        let path = match resolve_path(candidates)? {
            Some(path) => path,
            None => self.materialize_default(candidates, target)?,
        };

        let raw = std::fs::read(&path)
            .map_err(|e| ConfigError::io("failed to read config file", &path, e))?;
        if raw.is_empty() {
            return Err(ConfigError::EmptyFile { path });
        }

        let rendered = render(&raw, target)?;
        decode::decode_into(&rendered, target)?;
        tracing::debug!(path = %path.display(), "config loaded");

        target.set_resolved_path(&path);
        target.validate().map_err(ConfigError::Validation)
    }

    /// Write the target's default config to the first candidate.
    fn materialize_default<S, T>(&self, candidates: &[S], target: &T) -> Result<PathBuf>
    where
        S: AsRef<str>,
        T: Configurable,
    {
        let content = match target.default_config() {
            Some(content) if !content.is_empty() => content,
            _ => return Err(not_found(candidates)),
        };

        // resolve_path already rejected an empty list
        let first = candidates.first().ok_or(ConfigError::InvalidInput)?;
        let path = resolve::candidate_path(first.as_ref())?;

        if let Some(parent) = path.parent() {
            create_dir_tree(parent, self.dir_mode)?;
        }
        write_new_file(&path, content.as_bytes(), self.file_mode)?;

        tracing::debug!(path = %path.display(), "wrote default config");
        Ok(path)
    }
}

/// Load the first existing candidate into `target` with default settings.
///
/// # Examples
///
/// ```no_run
/// use serde::{Deserialize, Serialize};
/// use yamlcfg::{Configurable, load_config};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct AppConfig {
///     #[serde(default)]
///     listen: String,
/// }
///
/// impl Configurable for AppConfig {}
///
/// let mut cfg = AppConfig::default();
/// load_config(&["./app.yaml", "$HOME/.config/app.yaml", "/etc/app.yaml"], &mut cfg)?;
/// # Ok::<(), yamlcfg::ConfigError>(())
/// ```
pub fn load_config<S, T>(candidates: &[S], target: &mut T) -> Result<()>
where
    S: AsRef<str>,
    T: Configurable,
{
    Loader::default().load(candidates, target)
}

fn not_found<S: AsRef<str>>(candidates: &[S]) -> ConfigError {
    ConfigError::NotFound {
        candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
    }
}

/// Render `raw` as a template when the target exposes a secret resolver.
fn render<'a, T: Configurable>(raw: &'a [u8], target: &T) -> Result<Cow<'a, [u8]>> {
    let Some(secrets) = target.secrets() else {
        return Ok(Cow::Borrowed(raw));
    };

    let text = std::str::from_utf8(raw)
        .map_err(|e| ConfigError::TemplateParse(format!("config is not valid UTF-8: {}", e)))?;
    let rendered = template::render(text, secrets).map_err(|e| match e {
        template::TemplateError::Parse { .. } => ConfigError::TemplateParse(e.to_string()),
        template::TemplateError::Exec { .. } => ConfigError::TemplateExec(e.to_string()),
    })?;

    tracing::trace!(bytes = rendered.len(), "rendered config template");
    Ok(Cow::Owned(rendered.into_bytes()))
}
