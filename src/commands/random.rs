//! Implementation of the `yamlcfg random` command.

use crate::cli::RandomArgs;
use yamlcfg::{Result, random_string};

/// Execute the `yamlcfg random` command.
pub fn cmd_random(args: RandomArgs) -> Result<()> {
    println!("{}", random_string(&args.alphabet, args.length));
    Ok(())
}
