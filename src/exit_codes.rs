//! Exit code constants for the yamlcfg CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, no config found)
//! - 2: I/O failure (read, write, mkdir, empty file)
//! - 3: Template or YAML parse failure
//! - 4: Validation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, empty candidate list, or no config found.
pub const USER_ERROR: i32 = 1;

/// Filesystem failure while reading or materializing a config file.
pub const IO_FAILURE: i32 = 2;

/// Template rendering or YAML decoding failed.
pub const PARSE_FAILURE: i32 = 3;

/// The loaded config was rejected by validation.
pub const VALIDATION_FAILURE: i32 = 4;
