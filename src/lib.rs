//! yamlcfg: load typed YAML configuration from the first existing candidate.
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use yamlcfg::{Configurable, load_config};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Settings {
//!     #[serde(default)]
//!     name: String,
//! }
//!
//! impl Configurable for Settings {
//!     fn default_config(&self) -> Option<String> {
//!         Some("name: example\n".into())
//!     }
//! }
//!
//! let mut settings = Settings::default();
//! load_config(&["$HOME/.config/example.yaml", "/etc/example.yaml"], &mut settings)?;
//! # Ok::<(), yamlcfg::ConfigError>(())
//! ```
//!
//! See [`Configurable`] for the optional hooks (default content, secrets,
//! resolved path, validation) and [`template`] for the template syntax.

pub mod capability;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod loader;
pub mod random;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;

pub use capability::{Configurable, SecretLookup};
pub use error::{BoxError, ConfigError, Result};
pub use loader::{Loader, expand_env, load_config, resolve_path};
pub use random::{CHARSET_ALPHANUMERIC, random_alphanumeric, random_string};
