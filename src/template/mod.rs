//! Template rendering for config files.
//!
//! A config file whose type exposes a [`SecretLookup`] is rendered before it
//! is parsed. The syntax is a small subset of the usual `{{ ... }}` action
//! convention:
//!
//! ```text
//! database:
//!   password: {{ secret "db-password" }}
//!   user: {{ env "DB_USER" }}
//! literal: {{ "{{ not an action }}" }}
//! {{/* comments render as nothing */}}
//! ```
//!
//! - `secret "name"` inlines the value returned by the resolver
//! - `env "NAME"` inlines an environment variable (empty if unset)
//! - a bare string literal inlines itself, which is how to write `{{`
//! - `{{-` and `-}}` trim whitespace before/after the action
//!
//! Lone `{` and `}` are ordinary text, so YAML flow mappings are unaffected.

mod parser;

use crate::capability::SecretLookup;
use parser::Node;
use thiserror::Error;

/// Error type for template failures.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template is malformed; nothing was executed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A function failed while the template was executing.
    #[error("{function} {name:?}: {message}")]
    Exec {
        function: &'static str,
        name: String,
        message: String,
    },
}

/// Render `template`, resolving `secret` calls through `secrets`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use yamlcfg::template::render;
///
/// let mut secrets = HashMap::new();
/// secrets.insert("token".to_string(), "abc123".to_string());
///
/// let out = render(r#"token: {{ secret "token" }}"#, &secrets).unwrap();
/// assert_eq!(out, "token: abc123");
/// ```
pub fn render(template: &str, secrets: &dyn SecretLookup) -> Result<String, TemplateError> {
    let nodes = parser::parse(template)?;
    let mut out = String::with_capacity(template.len());

    for node in nodes {
        match node {
            Node::Text(text) | Node::Literal(text) => out.push_str(&text),
            Node::Env(name) => out.push_str(&std::env::var(&name).unwrap_or_default()),
            Node::Secret(name) => {
                let value = secrets
                    .lookup_secret(&name)
                    .map_err(|e| TemplateError::Exec {
                        function: "secret",
                        message: e.to_string(),
                        name,
                    })?;
                out.push_str(&value);
            }
        }
    }

    Ok(out)
}
