//! order command - Print the computed teaching order

use anyhow::Result;
use serde_json::json;

use super::{load_config, load_graph};
use crate::check::ExitStatus;
use crate::cli::args::MatrixArgs;
use crate::cli::Context;
use crate::core::config::ReportFormat;
use crate::core::sequence::sequence;
use crate::ui::output;

/// Print a teaching order, one section per line.
///
/// Exits with a failure status (and prints the cycle) if no order exists.
pub fn order(
    ctx: &Context,
    source: &MatrixArgs,
    format: Option<ReportFormat>,
) -> Result<ExitStatus> {
    let config = load_config(ctx)?;
    let graph = load_graph(ctx, &config, source)?;
    let format = format.unwrap_or_else(|| config.format());

    let result = sequence(&graph);
    let matches_declared = result
        .as_ref()
        .ok()
        .map(|order| *order == graph.declared_order());

    match format {
        ReportFormat::Json => {
            let value = match &result {
                Ok(order) => json!({
                    "ok": true,
                    "sequence": order,
                    "sequence_matches_declared": matches_declared,
                }),
                Err(err) => json!({
                    "ok": false,
                    "cycle": err.path,
                }),
            };
            output::emit(serde_json::to_string_pretty(&value)?);
        }
        ReportFormat::Text => match &result {
            Ok(order) => {
                for id in order {
                    let node = graph.lookup(id);
                    let title = node.map(|n| n.title.as_str()).unwrap_or_default();
                    let ordinal = node.map(|n| n.ordinal.get()).unwrap_or_default();
                    output::print(format!("{ordinal:>3}  {id}  {title}"), ctx.verbosity());
                }
                if matches_declared == Some(false) {
                    output::warn(
                        "teaching order differs from the declared ordinals",
                        ctx.verbosity(),
                    );
                }
            }
            Err(err) => output::error(err),
        },
    }

    Ok(if result.is_ok() {
        ExitStatus::Clean
    } else {
        ExitStatus::Failed
    })
}
