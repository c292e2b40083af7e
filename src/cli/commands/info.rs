//! info command - Show one section's place in the graph

use anyhow::{anyhow, Context as _, Result};
use serde_json::json;

use super::{load_config, load_graph};
use crate::check::ExitStatus;
use crate::cli::args::MatrixArgs;
use crate::cli::Context;
use crate::core::config::ReportFormat;
use crate::core::registry::LessonNode;
use crate::core::types::LessonId;
use crate::ui::output;

/// Show title, ordinal, direct and transitive neighbours of a section.
///
/// An unknown id is an error (exit status 2).
pub fn info(
    ctx: &Context,
    id: &str,
    source: &MatrixArgs,
    format: Option<ReportFormat>,
) -> Result<ExitStatus> {
    let config = load_config(ctx)?;
    let graph = load_graph(ctx, &config, source)?;
    let format = format.unwrap_or_else(|| config.format());

    let id = LessonId::new(id).context("Invalid section id")?;
    let node = graph
        .lookup(&id)
        .ok_or_else(|| anyhow!("Unknown section '{}'", id))?;

    let prerequisites = ids(graph.prerequisites(&id));
    let dependents = ids(graph.dependents(&id));
    let ancestors = ids(graph.ancestors(&id));
    let descendants = ids(graph.descendants(&id));

    match format {
        ReportFormat::Json => {
            let value = json!({
                "id": node.id,
                "title": node.title,
                "ordinal": node.ordinal,
                "prerequisites": prerequisites,
                "dependents": dependents,
                "all_prerequisites": ancestors,
                "all_dependents": descendants,
            });
            output::emit(serde_json::to_string_pretty(&value)?);
        }
        ReportFormat::Text => {
            let verbosity = ctx.verbosity();
            output::print(format!("{} ({})", node.id, node.title), verbosity);
            output::print(format!("ordinal: {}", node.ordinal), verbosity);
            for (label, list) in [
                ("prerequisites", &prerequisites),
                ("dependents", &dependents),
                ("all prerequisites", &ancestors),
                ("all dependents", &descendants),
            ] {
                output::labelled_list(label, list, verbosity);
            }
        }
    }

    Ok(ExitStatus::Clean)
}

fn ids(nodes: Vec<&LessonNode>) -> Vec<LessonId> {
    nodes.into_iter().map(|n| n.id.clone()).collect()
}
