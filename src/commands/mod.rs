//! Command implementations for yamlcfg.
//!
//! Routes parsed CLI commands to their handlers.

mod load;
mod random;

use crate::cli::Command;
use yamlcfg::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Load(args) => load::cmd_load(args),
        Command::Random(args) => random::cmd_random(args),
    }
}
