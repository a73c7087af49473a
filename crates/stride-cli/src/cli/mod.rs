use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `stride` binary.
#[derive(Debug, Parser)]
#[command(name = "stride", version, about = "Stride - resolve work-tracking objects from a local store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Resolve fields on behalf of this username
    #[arg(long, global = true)]
    pub viewer: Option<String>,

    /// Database path (overrides `database.path`)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            viewer: self.viewer.clone(),
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::root_commands::{ClaimArg, InputKind};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "stride", "--format", "raw", "--limit", "10", "--verbose", "tasks",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tasks));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["stride", "task", "7", "--viewer", "ada", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.global_flags().viewer.as_deref(), Some("ada"));
        match cli.command {
            Commands::Task(args) => {
                assert_eq!(args.id, 7);
                assert_eq!(args.user_id, None);
                assert!(!args.listing);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["stride", "--format", "xml", "tasks"]).is_err());
    }

    #[test]
    fn value_enums_use_kebab_case() {
        let cli = Cli::try_parse_from(["stride", "create", "code-repository", "repo.json"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Create(ref args) if args.kind == InputKind::CodeRepository
        ));

        let cli = Cli::try_parse_from(["stride", "claim", "3", "grace", "put-on-hold"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Claim { kind: ClaimArg::PutOnHold, task: 3, .. }
        ));
    }

    #[test]
    fn schema_name_and_list_conflict() {
        assert!(Cli::try_parse_from(["stride", "schema", "task_input", "--list"]).is_err());
    }
}
