//! Opt-in hooks a config type can provide to the loader.
//!
//! Every method on [`Configurable`] has a default that means "not supported",
//! so a plain config struct only needs an empty `impl Configurable for T {}`.
//! Override the methods you need:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use std::path::{Path, PathBuf};
//! use yamlcfg::{BoxError, Configurable};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct AppConfig {
//!     listen: String,
//!     #[serde(skip)]
//!     source: PathBuf,
//! }
//!
//! impl Configurable for AppConfig {
//!     fn default_config(&self) -> Option<String> {
//!         Some("listen: 127.0.0.1:8080\n".to_string())
//!     }
//!
//!     fn set_resolved_path(&mut self, path: &Path) {
//!         self.source = path.to_path_buf();
//!     }
//!
//!     fn validate(&self) -> Result<(), BoxError> {
//!         if self.listen.is_empty() {
//!             return Err("listen address must be set".into());
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::BoxError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

/// A config type that `load_config` can populate.
///
/// Fields the document does not mention keep their current value, except
/// `#[serde(skip)]` fields, which are rebuilt from `Default` when the
/// document is decoded. State the hooks need before decoding (default
/// content, secrets) may live there; `set_resolved_path` runs afterwards.
///
/// A key with no value (`key:` or `key: ~`) also keeps the current value, so
/// a file cannot reset an `Option` that is already `Some` to `None`.
/// `#[serde(alias)]` names are accepted in place of the field name, but not
/// both in one mapping.
pub trait Configurable: Serialize + DeserializeOwned {
    /// Content written to the first candidate when no candidate exists.
    ///
    /// `None` or an empty string means no default is available.
    fn default_config(&self) -> Option<String> {
        None
    }

    /// Secret resolver used to render the file as a template.
    ///
    /// Returning `Some` turns on `{{ secret "..." }}` / `{{ env "..." }}`
    /// rendering; `None` passes the file through untouched.
    fn secrets(&self) -> Option<&dyn SecretLookup> {
        None
    }

    /// Receives the path the config was actually read from.
    fn set_resolved_path(&mut self, _path: &Path) {}

    /// Semantic validation run after the config is populated.
    fn validate(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Resolves `{{ secret "name" }}` references while rendering.
pub trait SecretLookup {
    /// Look up the secret called `name`.
    fn lookup_secret(&self, name: &str) -> Result<String, BoxError>;
}

impl<F> SecretLookup for F
where
    F: Fn(&str) -> Result<String, BoxError>,
{
    fn lookup_secret(&self, name: &str) -> Result<String, BoxError> {
        self(name)
    }
}

impl SecretLookup for HashMap<String, String> {
    fn lookup_secret(&self, name: &str) -> Result<String, BoxError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| format!("secret '{}' is not defined", name).into())
    }
}
