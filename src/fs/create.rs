//! File creation with explicit permissions.
//!
//! Used to materialize a default config file. The file is created with
//! create-new semantics: if something already exists at the target path the
//! write fails instead of replacing it.
//!
//! # Cross-Platform Behavior
//!
//! - **Unix**: directory and file modes are applied at creation time (and are
//!   still subject to the process umask).
//! - **Other platforms**: modes are ignored and platform defaults apply.

use crate::error::{ConfigError, Result};
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Create `dir` and any missing parents.
pub fn create_dir_tree(dir: &Path, mode: u32) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    set_dir_mode(&mut builder, mode);

    builder
        .create(dir)
        .map_err(|e| ConfigError::io("failed to create config directory", dir, e))
}

/// Write `content` to a file that must not exist yet, then sync it to disk.
///
/// On a write or sync failure the partial file is removed.
pub fn write_new_file(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    set_file_mode(&mut options, mode);

    let mut file: File = options
        .open(path)
        .map_err(|e| ConfigError::io("failed to create default config", path, e))?;

    file.write_all(content).and_then(|()| file.sync_all()).map_err(|e| {
        let _ = fs::remove_file(path);
        ConfigError::io("failed to write default config", path, e)
    })
}

#[cfg(unix)]
fn set_dir_mode(builder: &mut DirBuilder, mode: u32) {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(mode);
}

#[cfg(not(unix))]
fn set_dir_mode(_builder: &mut DirBuilder, _mode: u32) {}

#[cfg(unix)]
fn set_file_mode(options: &mut OpenOptions, mode: u32) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(mode);
}

#[cfg(not(unix))]
fn set_file_mode(_options: &mut OpenOptions, _mode: u32) {}
