//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this global config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::ReportFormat;
use crate::matrix::InputFormat;

/// Syllabus - lint the dependency matrix of a lesson curriculum
#[derive(Parser, Debug)]
#[command(name = "syl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if syl was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Global config file to use instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Where to read the matrix from.
#[derive(Args, Debug, Clone, Default)]
pub struct MatrixArgs {
    /// Matrix file (defaults to `matrix` in syllabus.toml)
    pub path: Option<PathBuf>,

    /// Matrix format (defaults to the file extension)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormatArg>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the dependency matrix
    #[command(
        name = "check",
        long_about = "Validate the dependency matrix.\n\n\
            Loads the matrix, rejects malformed input (duplicate ids or ordinals, \
            references to unknown sections, self loops), then reports every cycle \
            and every inconsistency between depends-on and enables declarations.",
        after_help = "\
EXIT STATUS:
    0  acyclic and consistent
    1  cycle or inconsistency found (warnings too with --strict)
    2  malformed input

EXAMPLES:
    # Check the matrix named in syllabus.toml
    syl check

    # Check a Markdown table directly, failing on warnings
    syl check docs/dependencies.md --strict

    # Machine-readable report for CI
    syl check matrix.toml --format json"
    )]
    Check {
        #[command(flatten)]
        source: MatrixArgs,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,

        /// Do not flag sections that touch no edge
        #[arg(long)]
        allow_orphans: bool,

        /// Report format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Print the computed teaching order
    #[command(
        name = "order",
        long_about = "Print a teaching order that satisfies every prerequisite.\n\n\
            Among sections that are ready at the same time the lowest declared \
            ordinal goes first, so a legal matrix prints in its declared order."
    )]
    Order {
        #[command(flatten)]
        source: MatrixArgs,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Show one section's prerequisites and dependents
    #[command(name = "info")]
    Info {
        /// Section id
        id: String,

        #[command(flatten)]
        source: MatrixArgs,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Show or create configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    syl completion bash > ~/.local/share/bash-completion/completions/syl

    # Zsh
    syl completion zsh > ~/.zfunc/_syl"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the resolved configuration and where it came from
    Show,
    /// Write a syllabus.toml in the current directory
    Init {
        /// Matrix file, relative to the current directory
        matrix: PathBuf,

        /// Matrix format to record
        #[arg(long, value_enum)]
        input_format: Option<InputFormatArg>,
    },
}

/// Report format flag.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

/// Matrix format flag.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormatArg {
    Toml,
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Toml => InputFormat::Toml,
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Markdown => InputFormat::Markdown,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
