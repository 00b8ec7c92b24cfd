//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Provision and launch the freeland tunnel
///
/// Before the engine starts, the authority must accept your key, assign
/// you a node, and the engine profile is written for that node.
///
/// Enroll once with the name and UUID you were issued:
///   freeland enroll --uname <NAME> --uuid <UUID>
#[derive(Parser, Debug)]
#[command(name = "freeland")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Authority host, overriding the settings file
    #[arg(long, env = "FREELAND_AUTHORITY", global = true)]
    pub authority: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store the subject name and secret issued by the authority
    Enroll(EnrollArgs),

    /// Provision, start the engine and keep it running until interrupted
    Run,

    /// Provision without starting the engine and report the result
    Check,

    /// Print the synthesized engine profile
    Profile,

    /// Manage CLI settings
    Config(ConfigArgs),
}

// ============================================================================
// Enroll command
// ============================================================================

#[derive(Args, Debug)]
pub struct EnrollArgs {
    /// Your registered user name
    #[arg(long)]
    pub uname: String,

    /// Your assigned UUID
    #[arg(long)]
    pub uuid: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current settings
    Show,

    /// Set a setting value
    Set {
        /// Setting key (e.g. authority_host, key_path, engine_command)
        key: String,
        /// Value to set
        value: String,
    },

    /// Show settings file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn enroll_requires_both_fields() {
        assert!(Cli::try_parse_from(["freeland", "enroll", "--uname", "bob"]).is_err());
        let cli = Cli::try_parse_from(["freeland", "enroll", "--uname", "bob", "--uuid", "u"]).unwrap();
        assert!(matches!(cli.command, Commands::Enroll(_)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["freeland", "check", "-o", "json", "-v"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.verbose);
    }
}
