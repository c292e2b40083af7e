//! check
//!
//! Whole-graph validation.
//!
//! # Modules
//!
//! - [`issues`] - Inconsistency kinds, severities and stable issue IDs
//! - [`consistency`] - Symmetry, ordering, density and orphan checks
//! - [`report`] - Aggregated result, rendering and exit status
//!
//! # Flow
//!
//! One synchronous pass over an already-built graph:
//! cycle detection → sequencing → consistency checks → [`Report`].
//! Cycle detection and the consistency checks are exhaustive, so a single
//! run surfaces every problem an author has to fix.

pub mod consistency;
pub mod issues;
pub mod report;

pub use consistency::{check, CheckOptions};
pub use issues::{Inconsistency, InconsistencyKind, IssueId, Severity};
pub use report::{ExitStatus, Report};

use crate::core::cycle::detect_cycles;
use crate::core::graph::DependencyGraph;
use crate::core::sequence::sequence;

/// Run every check against a graph.
///
/// # Example
///
/// ```
/// use syllabus::check::{run, CheckOptions};
/// use syllabus::matrix::{InputFormat, Matrix};
///
/// let graph = Matrix::parse(
///     r#"{"sections": [
///         {"id": "net", "enables": ["auth"]},
///         {"id": "auth", "depends_on": ["net"]}
///     ]}"#,
///     InputFormat::Json,
/// )
/// .unwrap()
/// .build_graph()
/// .unwrap();
///
/// let report = run(&graph, &CheckOptions::default());
/// assert!(report.is_ok());
/// assert_eq!(report.matches_declared, Some(true));
/// ```
pub fn run(graph: &DependencyGraph, options: &CheckOptions) -> Report {
    let cycles = detect_cycles(graph);
    tracing::debug!(cycles = cycles.len(), "cycle detection finished");

    let sequence = match sequence(graph) {
        Ok(order) => Some(order),
        Err(err) => {
            tracing::debug!(%err, "no teaching order");
            None
        }
    };
    let matches_declared = sequence
        .as_ref()
        .map(|order| *order == graph.declared_order());

    let issues = check(graph, options);

    Report {
        sections: graph.node_count(),
        edges: graph.edge_count(),
        cycles,
        sequence,
        matches_declared,
        issues,
        strict: options.strict,
    }
}
