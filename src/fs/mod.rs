//! Filesystem utilities for yamlcfg.

pub mod create;
mod path;

pub use create::{create_dir_tree, write_new_file};
pub use path::absolutize;
