//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nestgen_core::domain::TemplateVariant;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nestgen",
    bin_name = "nestgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a NestJS CRUD module from one name",
    long_about = "nestgen runs the Nest CLI for a module, service and controller, \
                  moves the results into subfolders and writes a TypeORM entity, \
                  DTOs and a Swagger-documented CRUD controller around them.",
    after_help = "EXAMPLES:\n\
        \x20 nestgen generate userProfile\n\
        \x20 nestgen g invoice --variant classic\n\
        \x20 nestgen g order --dry-run\n\
        \x20 nestgen completions bash > /usr/share/bash-completion/completions/nestgen",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute. Without one there is no module name either.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a CRUD module.
    #[command(
        visible_alias = "g",
        about = "Generate a CRUD module",
        after_help = "EXAMPLES:\n\
            \x20 nestgen generate userProfile          # src/user-profile/\n\
            \x20 nestgen g product --skip-generator    # templates only, no nest CLI\n\
            \x20 nestgen g product --project-dir ../api --src-dir apps/api/src"
    )]
    Generate(GenerateArgs),

    /// Initialise a nestgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nestgen init           # default location\n\
            \x20 nestgen init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nestgen completions bash > ~/.local/share/bash-completion/completions/nestgen\n\
            \x20 nestgen completions zsh  > ~/.zfunc/_nestgen\n\
            \x20 nestgen completions fish > ~/.config/fish/completions/nestgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the nestgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nestgen config get generator.program\n\
            \x20 nestgen config list\n\
            \x20 nestgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `nestgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Module name, e.g. `userProfile`, `user-profile` or `UserProfile`.
    ///
    /// Optional at the parser level so that a missing name is reported by
    /// nestgen itself with exit code 1.
    #[arg(value_name = "NAME", help = "Module name (any case style)")]
    pub name: Option<String>,

    /// Print the plan without touching the file system.
    #[arg(long = "dry-run", help = "Show what would be done without doing it")]
    pub dry_run: bool,

    #[arg(
        long = "variant",
        value_enum,
        value_name = "VARIANT",
        help = "Template set (default from config: repository)"
    )]
    pub variant: Option<Variant>,

    #[arg(
        long = "src-dir",
        value_name = "DIR",
        help = "Source directory relative to the project (default from config: src)"
    )]
    pub src_dir: Option<PathBuf>,

    #[arg(
        long = "project-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Nest project root; the generator runs here"
    )]
    pub project_dir: PathBuf,

    /// Never shell out; only write folders and templated files.
    #[arg(
        long = "skip-generator",
        help = "Do not run the Nest CLI, only write templated files"
    )]
    pub skip_generator: bool,
}

/// Template set selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Service backed by a custom repository class.
    #[value(alias = "repo")]
    Repository,
    /// Service injecting TypeORM's `Repository<T>` directly.
    Classic,
}

impl From<Variant> for TemplateVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Repository => TemplateVariant::Repository,
            Variant::Classic => TemplateVariant::Classic,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `nestgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `nestgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `nestgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generator.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from(["nestgen", "generate", "userProfile"]);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.name.as_deref(), Some("userProfile"));
                assert_eq!(args.project_dir, PathBuf::from("."));
                assert!(args.variant.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn generate_alias_and_flags() {
        let cli = Cli::parse_from([
            "nestgen",
            "g",
            "order",
            "--variant",
            "repo",
            "--src-dir",
            "apps/api/src",
            "--skip-generator",
            "--dry-run",
        ]);
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected Generate");
        };
        assert_eq!(args.variant, Some(Variant::Repository));
        assert_eq!(args.src_dir, Some(PathBuf::from("apps/api/src")));
        assert!(args.skip_generator);
        assert!(args.dry_run);
    }

    #[test]
    fn name_is_optional_for_the_parser() {
        let cli = Cli::try_parse_from(["nestgen", "generate"]).unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected Generate");
        };
        assert!(args.name.is_none());
    }

    #[test]
    fn subcommand_is_optional_for_the_parser() {
        let cli = Cli::try_parse_from(["nestgen", "-v"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn variant_converts_to_core() {
        assert_eq!(
            TemplateVariant::from(Variant::Classic),
            TemplateVariant::Classic
        );
        assert_eq!(
            TemplateVariant::from(Variant::Repository),
            TemplateVariant::Repository
        );
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let result = Cli::try_parse_from(["nestgen", "g", "order", "--variant", "mongo"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["nestgen", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
