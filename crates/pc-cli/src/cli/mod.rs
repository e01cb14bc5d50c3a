use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pcheck` binary.
#[derive(Debug, Parser)]
#[command(name = "pcheck", version, about = "pointcheck - area check lab client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Shared storage directory (overrides session.storage_dir)
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            storage_dir: self.storage_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, FormCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["pcheck", "--format", "table", "--verbose", "history"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::History));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pcheck", "history", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["pcheck", "--format", "xml", "history"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn check_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["pcheck", "check", "-1.5", "-4", "--r", "2"])
            .expect("cli should parse");

        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!((args.x, args.y, args.r), (Some(-1.5), Some(-4.0), Some(2.0)));
        assert_eq!(args.at_svg, None);
    }

    #[test]
    fn check_accepts_svg_position_instead_of_coordinates() {
        let cli = Cli::try_parse_from(["pcheck", "check", "--at-svg", "40", "-80"])
            .expect("cli should parse");

        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.at_svg, Some(vec![40.0, -80.0]));
        assert_eq!((args.x, args.y), (None, None));
    }

    #[test]
    fn check_needs_coordinates_or_svg_position() {
        assert!(Cli::try_parse_from(["pcheck", "check"]).is_err());
        assert!(Cli::try_parse_from(["pcheck", "check", "1"]).is_err());
        assert!(Cli::try_parse_from(["pcheck", "check", "1", "1", "--at-svg", "0", "0"]).is_err());
        assert!(Cli::try_parse_from(["pcheck", "check", "--at-svg", "40"]).is_err());
    }

    #[test]
    fn contains_requires_all_three_values() {
        assert!(Cli::try_parse_from(["pcheck", "contains", "1", "1"]).is_err());
        let cli = Cli::try_parse_from(["pcheck", "contains", "-1", "-0.5", "2"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Contains(_)));
    }

    #[test]
    fn auth_login_takes_username_and_password() {
        let cli = Cli::try_parse_from(["pcheck", "auth", "login", "alice", "--password", "secret1"])
            .expect("cli should parse");

        let Commands::Auth {
            action: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.username, "alice");
        assert_eq!(args.password, "secret1");
    }

    #[test]
    fn form_set_parses_values() {
        let cli = Cli::try_parse_from(["pcheck", "form", "set", "0.5", "-2", "1.5"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Form {
                action: FormCommands::Set(_)
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["pcheck", "--storage-dir", "/tmp/pc", "history"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(
            flags.storage_dir.as_deref(),
            Some(std::path::Path::new("/tmp/pc"))
        );
    }
}
