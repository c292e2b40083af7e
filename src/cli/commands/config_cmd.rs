//! config command - Show or initialize configuration

use std::path::Path;

use anyhow::{Context as _, Result};

use super::load_config;
use crate::check::ExitStatus;
use crate::cli::Context;
use crate::core::config::{Config, ProjectConfig};
use crate::matrix::InputFormat;
use crate::ui::output;

/// Print the resolved configuration and the files it came from.
pub fn show(ctx: &Context) -> Result<ExitStatus> {
    let config = load_config(ctx)?;
    let verbosity = ctx.verbosity();

    let source = |path: Option<&Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };

    output::emit(format!(
        "global config: {}",
        source(config.global_config_loaded_from())
    ));
    output::emit(format!(
        "project config: {}",
        source(config.project_config_loaded_from())
    ));
    output::print("", verbosity);

    let matrix = config
        .matrix()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unset)".to_string());
    let input_format = config
        .input_format()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "(from extension)".to_string());

    output::emit(format!("matrix = {matrix}"));
    output::emit(format!("input_format = {input_format}"));
    output::emit(format!("strict = {}", config.strict()));
    output::emit(format!("format = {}", config.format()));
    output::emit(format!(
        "require_connected = {}",
        config.require_connected()
    ));

    Ok(ExitStatus::Clean)
}

/// Write a `syllabus.toml` into the working directory.
pub fn init(
    ctx: &Context,
    matrix: &Path,
    input_format: Option<InputFormat>,
) -> Result<ExitStatus> {
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;

    let project = ProjectConfig {
        matrix: Some(matrix.to_path_buf()),
        input_format,
        ..ProjectConfig::default()
    };

    let path = Config::write_project(&cwd, &project).context("Failed to write config")?;
    tracing::debug!(path = %path.display(), "wrote project config");

    if !cwd.join(matrix).exists() {
        output::warn(
            format!("matrix '{}' does not exist yet", matrix.display()),
            ctx.verbosity(),
        );
    }
    output::print(format!("Wrote {}", path.display()), ctx.verbosity());

    Ok(ExitStatus::Clean)
}
