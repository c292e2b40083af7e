//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration and the matrix source
//! 2. Builds the dependency graph (malformed input is an `Err`)
//! 3. Runs the relevant checks and prints the result
//! 4. Returns the exit status
//!
//! Handlers never mutate the matrix; the only write is `config init`.

mod check;
mod completion;
mod config_cmd;
mod info;
mod order;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use config_cmd::{init as config_init, show as config_show};
pub use info::info;
pub use order::order;

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use crate::check::ExitStatus;
use crate::cli::args::{Command, ConfigAction, MatrixArgs};
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::graph::DependencyGraph;
use crate::matrix::Matrix;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitStatus> {
    match command {
        Command::Check {
            source,
            strict,
            allow_orphans,
            format,
        } => check::check(ctx, &source, strict, allow_orphans, format.map(Into::into)),
        Command::Order { source, format } => order::order(ctx, &source, format.map(Into::into)),
        Command::Info { id, source, format } => {
            info::info(ctx, &id, &source, format.map(Into::into))
        }
        Command::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(ctx),
            ConfigAction::Init {
                matrix,
                input_format,
            } => config_cmd::init(ctx, &matrix, input_format.map(Into::into)),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load configuration for this run.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let cwd = ctx.working_dir().context("Failed to determine working directory")?;
    Config::load(Some(&cwd), ctx.config.as_deref()).context("Failed to load configuration")
}

/// Resolve the matrix path from the command line or the project config.
pub(crate) fn matrix_path(ctx: &Context, config: &Config, source: &MatrixArgs) -> Result<PathBuf> {
    if let Some(path) = &source.path {
        if path.is_absolute() {
            return Ok(path.clone());
        }
        let cwd = ctx.working_dir().context("Failed to determine working directory")?;
        return Ok(cwd.join(path));
    }

    match config.matrix() {
        Some(path) => Ok(path),
        None => bail!(
            "No matrix given. Pass a path or set `matrix` in syllabus.toml (see `syl config init`)."
        ),
    }
}

/// Load the matrix and build the dependency graph.
pub(crate) fn load_graph(
    ctx: &Context,
    config: &Config,
    source: &MatrixArgs,
) -> Result<DependencyGraph> {
    let path = matrix_path(ctx, config, source)?;
    let format = source
        .input_format
        .map(Into::into)
        .or_else(|| config.input_format());

    let matrix = Matrix::load(&path, format)?;
    let graph = matrix
        .build_graph()
        .with_context(|| format!("Invalid matrix '{}'", path.display()))?;
    Ok(graph)
}
