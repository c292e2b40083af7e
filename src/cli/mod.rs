//! cli
//!
//! Command-line interface layer for Syllabus.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging and load configuration
//! - Delegate to command handlers and map the outcome to an exit status
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers load the matrix, call into
//! [`crate::check`] and [`crate::core`], and format the result. Any error
//! that escapes a handler means the input could not be analyzed and exits
//! with status 2.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use crate::check::ExitStatus;
use crate::ui::output::{self, Verbosity};

/// Execution context shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override
    pub cwd: Option<PathBuf>,
    /// Global config file override
    pub config: Option<PathBuf>,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for this run.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet)
    }

    /// Effective working directory.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let cli = Cli::parse_args();
    crate::logging::init(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        config: cli.config.clone(),
        quiet: cli.quiet,
    };

    match commands::dispatch(cli.command, &ctx) {
        Ok(status) => status.into(),
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitStatus::Malformed.into()
        }
    }
}
