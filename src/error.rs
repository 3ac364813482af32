//! Error types for configuration loading.
//!
//! Uses thiserror for derive macros. Every pipeline stage fails with its own
//! variant so callers can tell a missing file from a broken template.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by caller-implemented capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for `load_config` and friends.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The candidate list was empty.
    #[error("candidate list needs at least one element")]
    InvalidInput,

    /// No candidate exists and no default config could be created.
    #[error("could not find config file: {candidates:?}")]
    NotFound {
        /// The candidates as they were passed in.
        candidates: Vec<String>,
    },

    /// Reading, writing, or creating directories failed.
    #[error("{action} '{}': {source}", path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// The path that was attempted.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resolved file exists but has no content.
    #[error("config file '{}' is empty", path.display())]
    EmptyFile { path: PathBuf },

    /// The config template is malformed.
    #[error("error parsing config template: {0}")]
    TemplateParse(String),

    /// A template function failed while rendering.
    #[error("error executing config template: {0}")]
    TemplateExec(String),

    /// The (rendered) content is not valid YAML for the target type.
    #[error("failed to parse config YAML: {0}")]
    Deserialize(String),

    /// The target's own validation rejected the loaded values.
    ///
    /// Displayed verbatim so caller wording is preserved.
    #[error("{0}")]
    Validation(BoxError),
}

impl ConfigError {
    /// Wrap an I/O failure with what was attempted and where.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::InvalidInput | ConfigError::NotFound { .. } => exit_codes::USER_ERROR,
            ConfigError::Io { .. } | ConfigError::EmptyFile { .. } => exit_codes::IO_FAILURE,
            ConfigError::TemplateParse(_)
            | ConfigError::TemplateExec(_)
            | ConfigError::Deserialize(_) => exit_codes::PARSE_FAILURE,
            ConfigError::Validation(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_candidates() {
        let err = ConfigError::NotFound {
            candidates: vec!["a.yaml".to_string(), "$HOME/b.yaml".to_string()],
        };
        assert_eq!(
            err.to_string(),
            r#"could not find config file: ["a.yaml", "$HOME/b.yaml"]"#
        );
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn io_error_names_path() {
        let err = ConfigError::io(
            "failed to read config file",
            "/etc/app.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "failed to read config file '/etc/app.yaml': denied"
        );
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn validation_error_is_verbatim() {
        let err = ConfigError::Validation("port must be positive".into());
        assert_eq!(err.to_string(), "port must be positive");
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn template_errors_share_exit_code() {
        assert_eq!(
            ConfigError::TemplateParse("x".into()).exit_code(),
            exit_codes::PARSE_FAILURE
        );
        assert_eq!(
            ConfigError::TemplateExec("x".into()).exit_code(),
            exit_codes::PARSE_FAILURE
        );
        assert_eq!(
            ConfigError::Deserialize("x".into()).exit_code(),
            exit_codes::PARSE_FAILURE
        );
    }
}
