//! check command - Validate the dependency matrix

use anyhow::{Context as _, Result};

use super::{load_config, load_graph};
use crate::check::{self, CheckOptions, ExitStatus};
use crate::cli::args::MatrixArgs;
use crate::cli::Context;
use crate::core::config::ReportFormat;
use crate::ui::output;

/// Validate the matrix and print the report.
///
/// CLI flags win over configuration: `--strict` can only turn strict mode
/// on, and `--allow-orphans` can only turn the orphan check off.
pub fn check(
    ctx: &Context,
    source: &MatrixArgs,
    strict: bool,
    allow_orphans: bool,
    format: Option<ReportFormat>,
) -> Result<ExitStatus> {
    let config = load_config(ctx)?;
    let graph = load_graph(ctx, &config, source)?;

    let options = CheckOptions {
        require_connected: config.require_connected() && !allow_orphans,
        strict: strict || config.strict(),
    };
    let report = check::run(&graph, &options);
    let format = format.unwrap_or_else(|| config.format());

    let rendered = report
        .render(format)
        .context("Failed to render report")?;
    match format {
        ReportFormat::Json => output::emit(rendered),
        ReportFormat::Text => output::print(rendered, ctx.verbosity()),
    }

    let status = report.exit_status();
    tracing::debug!(?status, "check finished");
    Ok(status)
}
