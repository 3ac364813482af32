//! Implementation of the `yamlcfg load` command.
//!
//! Loads candidates into an untyped YAML document, so any config file can be
//! inspected with the same resolution, default and template rules a typed
//! config gets.

use crate::cli::LoadArgs;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use yamlcfg::{ConfigError, Configurable, Result, SecretLookup, load_config};

/// A whole YAML document plus the hooks requested on the command line.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub value: Value,
    #[serde(skip)]
    default_content: Option<String>,
    #[serde(skip)]
    secrets: Option<HashMap<String, String>>,
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Configurable for Document {
    fn default_config(&self) -> Option<String> {
        self.default_content.clone()
    }

    fn secrets(&self) -> Option<&dyn SecretLookup> {
        self.secrets.as_ref().map(|s| s as &dyn SecretLookup)
    }

    fn set_resolved_path(&mut self, path: &Path) {
        self.path = Some(path.to_path_buf());
    }
}

/// Execute the `yamlcfg load` command.
pub fn cmd_load(args: LoadArgs) -> Result<()> {
    let json = args.json;
    let document = load_document(args)?;

    if let Some(path) = &document.path {
        eprintln!("# {}", path.display());
    }
    print!("{}", format_document(&document.value, json)?);
    Ok(())
}

/// Build a [`Document`] from the arguments and load it.
pub fn load_document(args: LoadArgs) -> Result<Document> {
    let default_content = args
        .default_file
        .as_deref()
        .map(|file| {
            std::fs::read_to_string(file)
                .map_err(|e| ConfigError::io("failed to read default file", file, e))
        })
        .transpose()?;

    let secrets = if args.template || !args.secrets.is_empty() {
        Some(args.secrets.into_iter().collect())
    } else {
        None
    };

    let mut document = Document {
        default_content,
        secrets,
        ..Default::default()
    };
    load_config(&args.candidates, &mut document)?;
    Ok(document)
}

fn format_document(value: &Value, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(value)
            .map_err(|e| ConfigError::Deserialize(format!("document is not representable as JSON: {}", e)))?;
        out.push('\n');
        Ok(out)
    } else {
        serde_yaml::to_string(value).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(candidates: &[&str]) -> LoadArgs {
        LoadArgs {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            default_file: None,
            secrets: Vec::new(),
            template: false,
            json: false,
        }
    }

    #[test]
    fn loads_document_and_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.yaml");
        fs::write(&path, "name: api\nport: 80\n").unwrap();

        let document = load_document(args(&[path.to_str().unwrap()])).unwrap();
        assert_eq!(document.path, Some(path));
        assert_eq!(document.value["name"].as_str(), Some("api"));
        assert_eq!(document.value["port"].as_u64(), Some(80));
    }

    #[test]
    fn writes_default_file_content() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = temp_dir.path().join("defaults.yaml");
        fs::write(&defaults, "name: fallback\n").unwrap();
        let target = temp_dir.path().join("conf").join("app.yaml");

        let mut load = args(&[target.to_str().unwrap()]);
        load.default_file = Some(defaults.to_str().unwrap().to_string());
        let document = load_document(load).unwrap();

        assert_eq!(document.value["name"].as_str(), Some("fallback"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "name: fallback\n");
    }

    #[test]
    fn secrets_enable_templating() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.yaml");
        fs::write(&path, "password: {{ secret \"db\" }}\n").unwrap();

        let mut load = args(&[path.to_str().unwrap()]);
        load.secrets = vec![("db".to_string(), "hunter2".to_string())];
        let document = load_document(load).unwrap();
        assert_eq!(document.value["password"].as_str(), Some("hunter2"));
    }

    #[test]
    fn template_flag_without_secrets_fails_on_secret() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.yaml");
        fs::write(&path, "password: {{ secret \"db\" }}\n").unwrap();

        let mut load = args(&[path.to_str().unwrap()]);
        load.template = true;
        let err = load_document(load).unwrap_err();
        assert!(matches!(err, ConfigError::TemplateExec(_)));
    }

    #[test]
    fn missing_default_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut load = args(&["app.yaml"]);
        load.default_file = Some(temp_dir.path().join("nope.yaml").to_str().unwrap().to_string());

        let err = load_document(load).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn formats_yaml_and_json() {
        let value: Value = serde_yaml::from_str("a: 1\n").unwrap();
        assert_eq!(format_document(&value, false).unwrap(), "a: 1\n");
        assert_eq!(format_document(&value, true).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
