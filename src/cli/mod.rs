//! CLI argument parsing for yamlcfg.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use yamlcfg::{CHARSET_ALPHANUMERIC, exit_codes};

/// yamlcfg: load YAML configuration from the first existing candidate path.
#[derive(Parser, Debug)]
#[command(name = "yamlcfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for yamlcfg.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the first existing candidate and print it.
    ///
    /// Candidates may reference environment variables ($HOME, ${XDG_CONFIG_HOME}).
    /// The resolved path is printed on stderr, the document on stdout.
    Load(LoadArgs),

    /// Print a random string.
    Random(RandomArgs),
}

/// Arguments for the `load` command.
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Candidate paths, in order of preference.
    #[arg(required = true)]
    pub candidates: Vec<String>,

    /// File whose content is written to the first candidate if none exists.
    #[arg(long)]
    pub default_file: Option<String>,

    /// Secret available to `{{ secret "NAME" }}` (repeatable).
    #[arg(long = "secret", value_name = "NAME=VALUE", value_parser = parse_secret)]
    pub secrets: Vec<(String, String)>,

    /// Render the file as a template even without --secret.
    #[arg(long)]
    pub template: bool,

    /// Print the document as JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `random` command.
#[derive(Parser, Debug)]
pub struct RandomArgs {
    /// Number of characters to generate.
    #[arg(short, long, default_value_t = 32)]
    pub length: usize,

    /// Characters to draw from.
    #[arg(
        short,
        long,
        default_value = CHARSET_ALPHANUMERIC,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub alphabet: String,
}

fn parse_secret(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Parse command line arguments.
    ///
    /// `--help` and `--version` also come back as errors; see
    /// [`usage_exit_code`].
    pub fn parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}

/// Exit code for a clap parse outcome.
///
/// Usage errors are user errors; help and version output is a success.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        exit_codes::USER_ERROR
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn usage_errors_are_user_errors() {
        let err = Cli::try_parse_from(["yamlcfg", "load"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::USER_ERROR);

        let err = Cli::try_parse_from(["yamlcfg", "frobnicate"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::USER_ERROR);
    }

    #[test]
    fn help_and_version_exit_successfully() {
        let err = Cli::try_parse_from(["yamlcfg", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::SUCCESS);

        let err = Cli::try_parse_from(["yamlcfg", "--version"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::SUCCESS);
    }

    #[test]
    fn parse_load_minimal() {
        let cli = Cli::try_parse_from(["yamlcfg", "load", "app.yaml"]).unwrap();
        if let Command::Load(args) = cli.command {
            assert_eq!(args.candidates, vec!["app.yaml"]);
            assert!(args.default_file.is_none());
            assert!(args.secrets.is_empty());
            assert!(!args.template);
            assert!(!args.json);
        } else {
            panic!("Expected Load command");
        }
    }

    #[test]
    fn parse_load_full() {
        let cli = Cli::try_parse_from([
            "yamlcfg",
            "-vv",
            "load",
            "./app.yaml",
            "$HOME/.app.yaml",
            "--default-file",
            "defaults.yaml",
            "--secret",
            "db=hunter2",
            "--secret",
            "token=a=b",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Command::Load(args) = cli.command {
            assert_eq!(args.candidates, vec!["./app.yaml", "$HOME/.app.yaml"]);
            assert_eq!(args.default_file.as_deref(), Some("defaults.yaml"));
            assert_eq!(
                args.secrets,
                vec![
                    ("db".to_string(), "hunter2".to_string()),
                    ("token".to_string(), "a=b".to_string()),
                ]
            );
            assert!(args.json);
        } else {
            panic!("Expected Load command");
        }
    }

    #[test]
    fn load_requires_a_candidate() {
        assert!(Cli::try_parse_from(["yamlcfg", "load"]).is_err());
    }

    #[test]
    fn malformed_secret_is_rejected() {
        assert!(Cli::try_parse_from(["yamlcfg", "load", "a.yaml", "--secret", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["yamlcfg", "load", "a.yaml", "--secret", "=x"]).is_err());
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        assert!(Cli::try_parse_from(["yamlcfg", "random", "--alphabet", ""]).is_err());
    }

    #[test]
    fn parse_random_defaults() {
        let cli = Cli::try_parse_from(["yamlcfg", "random"]).unwrap();
        if let Command::Random(args) = cli.command {
            assert_eq!(args.length, 32);
            assert_eq!(args.alphabet, CHARSET_ALPHANUMERIC);
        } else {
            panic!("Expected Random command");
        }
    }
}
